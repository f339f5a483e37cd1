//! Sample producers, one per value kind.
//!
//! Each producer is a pure function of its input; repeated calls return the
//! same value.

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use uuid::Uuid;

use wirecast_core::{Mapping, NameRecord, Reply, SetMember, Value};

const SAMPLE_ID: Uuid = Uuid::from_u128(0x0192_f1a4_7c3e_7b2a_9d4f_6e8a_1b2c_3d4e);

pub fn intdata() -> Value {
    Value::from(100)
}

pub fn floatdata() -> Value {
    Value::from(2.3)
}

pub fn stringdata() -> Value {
    Value::from("Avinash in string data")
}

pub fn booldata() -> Value {
    Value::from(true)
}

pub fn listdata() -> Value {
    Value::sequence([Value::from("avinash_in_list"), Value::from(33)])
}

pub fn tupledata() -> Value {
    Value::from(("avinash in tuple", 33))
}

pub fn setdata() -> Value {
    Value::unique_set([SetMember::from("avinash in set data"), SetMember::from(33)])
}

pub fn dictdata() -> Value {
    Mapping::new().with("name", "avinash").with("age", 33).into()
}

pub fn nonedata() -> Value {
    Value::Absent
}

/// Nothing to convert: answered with 204 and an empty body.
pub fn returnnothing() -> Reply {
    Reply::NoContent
}

pub fn modeldata(data: NameRecord) -> Value {
    data.into()
}

pub fn datetimedata() -> Value {
    NaiveDate::from_ymd_opt(2025, 10, 27)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .into()
}

pub fn uuiddata() -> Value {
    Value::from(SAMPLE_ID)
}

pub fn datedata() -> Value {
    NaiveDate::from_ymd_opt(2025, 10, 27).into()
}

pub fn timedata() -> Value {
    NaiveTime::from_hms_opt(14, 30, 0).into()
}

pub fn decimaldata() -> Value {
    Value::from(Decimal::new(25, 1))
}
