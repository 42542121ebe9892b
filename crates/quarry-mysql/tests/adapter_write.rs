mod common;

use chrono::{FixedOffset, TimeZone};
use common::{adapter, affected, rows, StubConnection, INT};
use quarry_core::model::{Collection, Criteria, Predicate};
use quarry_core::{DataSource, MultipleInsertion, Params, Record, Transactional, Value};
use quarry_mysql::{AdapterConfig, MySqlAdapter};

fn users() -> Collection {
    Collection::new("users")
}

#[test]
fn test_save_returns_insert_id() {
    let mut source = adapter(StubConnection::new().reply(affected(1)).insert_id(17));

    let id = source
        .save(&Record::new().set("name", "Ann").set("age", 30), &users())
        .unwrap();

    assert_eq!(id, 17);
    assert_eq!(
        source.connection().statements(),
        ["INSERT INTO `users` (`name`, `age`) VALUES ('Ann', 30)"]
    );
}

#[test]
fn test_save_multiple_is_one_statement() {
    let mut source = adapter(StubConnection::new().reply(affected(1)).reply(affected(2)));

    source
        .save(&Record::new().set("name", "a"), &users())
        .unwrap();
    let count = source
        .save_multiple(
            &[
                Record::new().set("name", "a"),
                Record::new().set("name", "b"),
            ],
            &users(),
        )
        .unwrap();

    assert_eq!(count, 2);
    assert_eq!(
        source.connection().statements(),
        [
            "INSERT INTO `users` (`name`) VALUES ('a')",
            "INSERT INTO `users` (`name`) VALUES ('a'), ('b')",
        ]
    );
}

#[test]
fn test_save_multiple_without_rows_skips_round_trip() {
    let mut source = adapter(StubConnection::new());
    assert_eq!(source.save_multiple(&[], &users()).unwrap(), 0);
    assert!(source.connection().statements().is_empty());
}

#[test]
fn test_update() {
    let mut source = adapter(StubConnection::new().reply(affected(4)));

    let changed = source
        .update(
            &Record::new().set("active", false),
            &Criteria::new(users()).filter(Predicate::lt("last_seen", 2020)),
        )
        .unwrap();

    assert_eq!(changed, 4);
    assert_eq!(
        source.connection().statements(),
        ["UPDATE `users` SET `active` = FALSE WHERE `last_seen` < 2020"]
    );
}

#[test]
fn test_delete() {
    let mut source = adapter(StubConnection::new().reply(affected(2)));

    let removed = source
        .delete(&Criteria::new(users()).filter(Predicate::in_list("id", vec![1, 2])))
        .unwrap();

    assert_eq!(removed, 2);
    assert_eq!(
        source.connection().statements(),
        ["DELETE FROM `users` WHERE `id` IN (1, 2)"]
    );
}

#[test]
fn test_delete_aliased() {
    let u = users().alias("u");
    let mut source = adapter(StubConnection::new());

    source
        .delete(&Criteria::new(u.clone()).filter(Predicate::is_null(u.field("email"))))
        .unwrap();

    assert_eq!(
        source.connection().statements(),
        ["DELETE `u` FROM `users` AS `u` WHERE `u`.`email` IS NULL"]
    );
}

#[test]
fn test_execute_with_params() {
    let mut source = adapter(StubConnection::new().reply(affected(1)));

    let changed = source
        .execute(
            "UPDATE users SET note = ? WHERE id = ?",
            &Params::positional(vec![Value::Text(String::from("a\\b")), Value::Int(9)]),
        )
        .unwrap();

    assert_eq!(changed, 1);
    assert_eq!(
        source.connection().statements(),
        [r"UPDATE users SET note = 'a\\b' WHERE id = 9"]
    );
}

#[test]
fn test_execute_counts_returned_rows() {
    let connection =
        StubConnection::new().reply(rows(&[("id", INT)], &[&[Some("1")], &[Some("2")]]));
    let mut source = adapter(connection);
    assert_eq!(source.execute("SELECT id FROM users", &Params::None).unwrap(), 2);
}

#[test]
fn test_transaction_statements() {
    let mut source = adapter(StubConnection::new());

    source.begin_transaction().unwrap();
    source
        .save(&Record::new().set("name", "x"), &users())
        .unwrap();
    source.commit().unwrap();
    source.begin_transaction().unwrap();
    source.rollback().unwrap();

    assert_eq!(
        source.connection().statements(),
        [
            "START TRANSACTION",
            "INSERT INTO `users` (`name`) VALUES ('x')",
            "COMMIT",
            "START TRANSACTION",
            "ROLLBACK",
        ]
    );
}

#[test]
fn test_datetimes_written_in_server_timezone() {
    let utc = FixedOffset::east_opt(0).unwrap();
    let config = AdapterConfig::new().server_timezone(utc);
    let mut source = MySqlAdapter::new(StubConnection::new(), config);

    let at = FixedOffset::east_opt(2 * 3600)
        .unwrap()
        .with_ymd_and_hms(2024, 1, 5, 12, 0, 0)
        .unwrap();
    source
        .save(&Record::new().set("at", at), &Collection::new("events"))
        .unwrap();

    assert_eq!(
        source.connection().statements(),
        ["INSERT INTO `events` (`at`) VALUES ('2024-01-05 10:00:00')"]
    );
}

#[test]
fn test_datetimes_written_in_named_zone_across_daylight_saving() {
    let config = AdapterConfig::new().server_timezone_str("Europe/Madrid").unwrap();
    let mut source = MySqlAdapter::new(StubConnection::new(), config);

    let utc = FixedOffset::east_opt(0).unwrap();
    let rows = [
        Record::new().set("at", utc.with_ymd_and_hms(2024, 3, 30, 12, 0, 0).unwrap()),
        Record::new().set("at", utc.with_ymd_and_hms(2024, 3, 31, 12, 0, 0).unwrap()),
    ];
    source
        .save_multiple(&rows, &Collection::new("events"))
        .unwrap();

    assert_eq!(
        source.connection().statements(),
        ["INSERT INTO `events` (`at`) VALUES ('2024-03-30 13:00:00'), ('2024-03-31 14:00:00')"]
    );
}
