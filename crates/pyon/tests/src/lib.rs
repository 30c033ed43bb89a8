//! Fixtures shared by the Pyon end-to-end and property suites.

pub mod strategies;

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};

use pyon::types::{ArrayData, Period, RangeIndex};
use pyon::{
    impl_entity, BitVector, ClassRegistry, DataFrame, EnumConstant, EnumDescriptor, FileHandle,
    Index, Map, NdArray, Object, Uuid, Value,
};

pub const STATUS: &str = "bank.Status";

/// Account holder with one attribute per visibility level.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Account {
    pub owner: String,
    pub balance: i64,
    pub tags: Vec<String>,
    pub status: Option<EnumConstant>,
    pub branch: Option<Object>,
    pub _pin: Option<i64>,
    pub __salt: Option<String>,
}

impl_entity!(
    Account,
    "bank.Account",
    object { owner, balance, tags, status, branch, _pin, __salt }
);

/// Declarative record.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Branch {
    pub code: String,
    pub lat: f64,
    pub lon: f64,
}

impl_entity!(Branch, "bank.Branch", record { code, lat, lon });

/// Entity whose `_total` is derived and rebuilt after decoding.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Ledger {
    pub entries: Vec<i64>,
    pub _total: i64,
}

fn recompute_total(ledger: &mut Ledger) {
    ledger._total = ledger.entries.iter().sum();
}

impl_entity!(Ledger, "bank.Ledger", object { entries, _total }, on_decode = recompute_total);

impl Ledger {
    pub fn new(entries: Vec<i64>) -> Self {
        let mut ledger = Self {
            entries,
            _total: 0,
        };
        recompute_total(&mut ledger);
        ledger
    }
}

pub fn status_enum() -> EnumDescriptor {
    EnumDescriptor::new(STATUS)
        .member("Active", 1i64)
        .member("Frozen", 2i64)
        .member("Closed", "closed")
}

pub fn status(member: &str) -> EnumConstant {
    status_enum().by_name(member).expect("known status member")
}

/// Registry knowing every fixture type.
pub fn registry() -> ClassRegistry {
    let mut registry = ClassRegistry::new();
    registry
        .register::<Account>()
        .register::<Branch>()
        .register::<Ledger>()
        .register_enum(status_enum());
    registry
}

pub fn branch() -> Branch {
    Branch {
        code: "LDN-01".into(),
        lat: 51.5,
        lon: -0.125,
    }
}

pub fn account() -> Account {
    Account {
        owner: "ada".into(),
        balance: 1200,
        tags: vec!["gold".into(), "joint".into()],
        status: Some(status("Active")),
        branch: Some(Object::new(branch())),
        _pin: None,
        __salt: None,
    }
}

pub fn account_with_secrets() -> Account {
    Account {
        _pin: Some(4321),
        __salt: Some("pepper".into()),
        ..account()
    }
}

pub fn bits() -> BitVector {
    "1011001".parse().expect("valid bit string")
}

pub fn matrix() -> NdArray {
    NdArray::from_vec(ArrayData::Int((1..=6).collect()))
        .reshape(vec![2, 3])
        .expect("six elements fit 2x3")
}

pub fn file() -> FileHandle {
    FileHandle::new("reports/q1.csv", "text/csv", b"a,b\n1,2\n".to_vec())
}

pub fn uuid() -> Uuid {
    Uuid::from_u128(0x6f1e_2b3c_4d5e_4f60_8a1b_2c3d_4e5f_6071)
}

fn record(entries: &[(&str, Value)]) -> Map {
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

/// Three rows over `price` and `qty`, default row labels.
pub fn frame() -> DataFrame {
    DataFrame::from_records(&[
        record(&[("price", Value::Float(9.5)), ("qty", Value::Int(3))]),
        record(&[("price", Value::Float(1.25)), ("qty", Value::Int(10))]),
        record(&[("price", Value::Float(4.0)), ("qty", Value::Int(0))]),
    ])
}

pub fn stepped_frame() -> DataFrame {
    frame()
        .with_index(Index::range(RangeIndex::new(10, 40, 10).expect("non-zero step")).named("row"))
        .expect("index matches row count")
}

pub fn dated_frame() -> DataFrame {
    let day = |d: u32| -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, d)
            .and_then(|date| date.and_hms_opt(9, 30, 0))
            .expect("valid timestamp")
    };
    frame()
        .with_index(Index::Datetime {
            values: vec![day(1), day(2), day(5)],
            name: Some("at".into()),
        })
        .expect("index matches row count")
}

pub fn period_frame() -> DataFrame {
    let quarters = (1..=3)
        .filter_map(|q| Period::quarterly(2023, q))
        .collect();
    frame()
        .with_index(Index::Period {
            values: quarters,
            name: None,
        })
        .expect("index matches row count")
}

pub fn elapsed_frame() -> DataFrame {
    frame()
        .with_index(Index::Timedelta {
            values: vec![
                TimeDelta::seconds(0),
                TimeDelta::minutes(90),
                TimeDelta::days(2),
            ],
            name: None,
        })
        .expect("index matches row count")
}

pub fn multi_frame() -> DataFrame {
    let index = Index::multi(
        vec![
            vec![Value::from("eu"), Value::Int(1)],
            vec![Value::from("eu"), Value::Int(2)],
            vec![Value::from("us"), Value::Int(1)],
        ],
        vec![Some("region".into()), None],
    )
    .expect("uniform arity");
    frame().with_index(index).expect("index matches row count")
}

pub fn labelled_frame() -> DataFrame {
    frame()
        .with_index(Index::labels(vec!["a".into(), "b".into(), "c".into()]).named("sku"))
        .expect("index matches row count")
}

/// One of everything the engine can encode, in a single tree.
pub fn kitchen_sink() -> Value {
    Value::map([
        ("account", Value::Object(Object::new(account()))),
        ("status", Value::Enum(status("Closed"))),
        ("bits", Value::Bits(bits())),
        ("matrix", Value::Array(matrix())),
        ("frame", Value::Frame(dated_frame())),
        ("id", Value::Uuid(uuid())),
        ("file", Value::File(file())),
        (
            "nested",
            Value::List(vec![
                Value::Null,
                Value::Float(0.5),
                Value::map([("deep", Value::Object(Object::new(branch())))]),
            ]),
        ),
    ])
}
