use chrono::{DateTime, NaiveDateTime};
use diesel::prelude::*;
use pricewatch::domain::price_record::NewPriceRecord;
use pricewatch::domain::types::{Price, ProductName};
use pricewatch::repository::{
    DieselRepository, PriceHistoryQuery, PriceRecordReader, PriceRecordWriter,
};
use pricewatch::schema::price_records;

mod common;

fn at(secs: i64) -> NaiveDateTime {
    DateTime::from_timestamp(secs, 0).unwrap().naive_utc()
}

fn new_record(name: &str, price: f64, secs: i64) -> NewPriceRecord {
    NewPriceRecord::new(
        ProductName::new(name).expect("valid product name"),
        Price::new(price).expect("valid price"),
        at(secs),
    )
}

#[test]
fn append_returns_stored_record() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let stored = repo
        .append_price_record(&new_record("Kettle", 450.0, 1_700_000_000))
        .expect("should append");

    assert_eq!(stored.id, 1);
    assert_eq!(stored.product_name, "Kettle");
    assert_eq!(stored.price, 450.0);
    assert_eq!(stored.recorded_at, at(1_700_000_000));
}

#[test]
fn latest_price_record_picks_newest() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());
    let kettle = ProductName::new("Kettle").unwrap();

    assert!(repo.latest_price_record(&kettle).unwrap().is_none());

    repo.append_price_record(&new_record("Kettle", 700.0, 100)).unwrap();
    repo.append_price_record(&new_record("Kettle", 450.0, 200)).unwrap();
    repo.append_price_record(&new_record("Toaster", 300.0, 300)).unwrap();

    let latest = repo
        .latest_price_record(&kettle)
        .unwrap()
        .expect("kettle has records");
    assert_eq!(latest.price, 450.0);
}

#[test]
fn history_is_newest_first_and_paginated() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    for i in 1..=5 {
        repo.append_price_record(&new_record("Kettle", 100.0 * i as f64, i * 60))
            .unwrap();
    }
    repo.append_price_record(&new_record("Toaster", 10.0, 10)).unwrap();

    let kettle = ProductName::new("Kettle").unwrap();
    let (total, page) = repo
        .list_price_records(PriceHistoryQuery::new(kettle.clone()).paginate(2, 2))
        .unwrap();
    assert_eq!(total, 5);
    let prices: Vec<f64> = page.iter().map(|r| r.price.get()).collect();
    assert_eq!(prices, vec![300.0, 200.0]);

    let (_, all) = repo
        .list_price_records(PriceHistoryQuery::new(kettle))
        .unwrap();
    assert_eq!(all.len(), 5);
    assert_eq!(all[0].price, 500.0);
}

#[test]
fn latest_per_product_lists_each_product_once() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    repo.append_price_record(&new_record("Toaster", 900.0, 100)).unwrap();
    repo.append_price_record(&new_record("Kettle", 700.0, 100)).unwrap();
    repo.append_price_record(&new_record("Kettle", 450.0, 200)).unwrap();

    let latest = repo.list_latest_price_records().unwrap();

    let summary: Vec<(String, f64)> = latest
        .into_iter()
        .map(|r| (r.product_name.into_inner(), r.price.get()))
        .collect();
    assert_eq!(
        summary,
        vec![("Kettle".to_string(), 450.0), ("Toaster".to_string(), 900.0)]
    );
}

#[test]
fn latest_follows_insertion_order_when_clock_steps_back() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());
    let kettle = ProductName::new("Kettle").unwrap();

    repo.append_price_record(&new_record("Kettle", 700.0, 200)).unwrap();
    repo.append_price_record(&new_record("Kettle", 450.0, 100)).unwrap();

    let latest = repo.latest_price_record(&kettle).unwrap().unwrap();
    let overview = repo.list_latest_price_records().unwrap();
    let (_, history) = repo
        .list_price_records(PriceHistoryQuery::new(kettle))
        .unwrap();

    assert_eq!(latest.price, 450.0);
    assert_eq!(overview[0], latest);
    assert_eq!(history[0], latest);
}

#[test]
fn page_far_beyond_the_end_is_empty() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());
    repo.append_price_record(&new_record("Kettle", 700.0, 100)).unwrap();

    let (total, page) = repo
        .list_price_records(
            PriceHistoryQuery::new(ProductName::new("Kettle").unwrap()).paginate(usize::MAX, 20),
        )
        .unwrap();

    assert_eq!(total, 1);
    assert!(page.is_empty());
}

#[test]
fn appends_never_touch_existing_rows() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    repo.append_price_record(&new_record("Kettle", 700.0, 100)).unwrap();
    let mut conn = test_db.pool().get().expect("connection");
    let before: Vec<(i32, String, f64, NaiveDateTime)> = price_records::table
        .order(price_records::id.asc())
        .load(&mut conn)
        .unwrap();

    repo.append_price_record(&new_record("Kettle", 450.0, 200)).unwrap();
    repo.append_price_record(&new_record("Kettle", 450.0, 200)).unwrap();

    let after: Vec<(i32, String, f64, NaiveDateTime)> = price_records::table
        .order(price_records::id.asc())
        .load(&mut conn)
        .unwrap();

    assert_eq!(after.len(), 3);
    assert_eq!(after[0], before[0]);
}
