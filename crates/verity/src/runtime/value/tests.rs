use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;

use serde::Serialize;

use super::{Integer, Value, ValueCategory};
use crate::runtime::{to_value, to_value_with, Error};
use crate::Options;

#[derive(Serialize)]
struct Point {
    x: i32,
    y: i32,
}

#[derive(Serialize)]
struct Meters(Vec<u32>);

#[derive(Serialize)]
struct Pair(i32, i32);

#[derive(Serialize)]
enum Shape {
    Empty,
    Circle(f64),
    Rect { w: u32, h: u32 },
}

fn value<T>(value: &T) -> Value
where
    T: ?Sized + Serialize,
{
    to_value(value).unwrap()
}

#[test]
fn test_categories() {
    assert_eq!(value(&vec![1, 2]).category(), ValueCategory::Sequence);
    assert_eq!(value(&[1u8, 2]).category(), ValueCategory::Sequence);
    assert_eq!(value(&(1, "a")).category(), ValueCategory::Sequence);
    assert_eq!(value(&HashMap::<String, i32>::new()).category(), ValueCategory::Map);
    assert_eq!(value("hello").category(), ValueCategory::Text);
    assert_eq!(value(&String::new()).category(), ValueCategory::Text);
    assert_eq!(value(&None::<i32>).category(), ValueCategory::Optional);
    assert_eq!(value(&Some(1)).category(), ValueCategory::Optional);
    assert_eq!(value(&42).category(), ValueCategory::Scalar);
    assert_eq!(value(&true).category(), ValueCategory::Scalar);
    assert_eq!(value(&Point { x: 1, y: 2 }).category(), ValueCategory::Scalar);
    assert_eq!(value(&Shape::Empty).category(), ValueCategory::Scalar);
    assert_eq!(value(&Meters(vec![])).category(), ValueCategory::Sequence);
}

#[test]
fn test_reflexive() {
    let mut map = HashMap::new();
    map.insert("a", vec![1, 2]);
    map.insert("b", vec![]);

    let values = [
        value(&vec![1, 2, 3]),
        value(&map),
        value("text"),
        value(&None::<String>),
        value(&Some(Some(1))),
        value(&f64::NAN),
        value(&Point { x: 1, y: 2 }),
        value(&Shape::Rect { w: 1, h: 2 }),
        value(&Shape::Circle(1.5)),
        value(&Pair(1, 2)),
        value(&()),
    ];

    for v in &values {
        assert!(v.structural_eq(v), "{v:?} is not equal to itself");
    }
}

#[test]
fn test_symmetric() {
    let values = [
        value(&vec![1, 2, 3]),
        value(&vec![1, 2]),
        value(&[1, 2, 3]),
        value("abc"),
        value(&'a'),
        value(&None::<i32>),
        value(&Some(1)),
        value(&1i32),
        value(&1i64),
        value(&Point { x: 1, y: 2 }),
    ];

    for a in &values {
        for b in &values {
            assert_eq!(
                a.structural_eq(b),
                b.structural_eq(a),
                "{a:?} and {b:?} are not symmetric"
            );
        }
    }
}

#[test]
fn test_sequences() {
    assert!(value(&vec![1, 2, 3]).structural_eq(&value(&[1, 2, 3])));
    assert!(!value(&vec![1, 2, 3]).structural_eq(&value(&vec![3, 2, 1])));
    assert!(!value(&vec![1, 2, 3]).structural_eq(&value(&vec![1, 2])));
    assert!(value(&Vec::<i32>::new()).structural_eq(&value(&[0i32; 0])));
}

#[test]
fn test_maps_ignore_order() {
    let mut a = HashMap::new();
    let mut b = BTreeMap::new();

    for (k, v) in [("one", 1), ("two", 2), ("three", 3)] {
        a.insert(k, v);
    }

    for (k, v) in [("three", 3), ("one", 1), ("two", 2)] {
        b.insert(k, v);
    }

    assert!(value(&a).structural_eq(&value(&b)));

    b.insert("four", 4);
    assert!(!value(&a).structural_eq(&value(&b)));

    a.insert("four", 5);
    assert!(!value(&a).structural_eq(&value(&b)));
}

#[test]
fn test_scalars_require_same_shape() {
    assert!(value(&1i32).structural_eq(&value(&1i32)));
    assert!(!value(&1i32).structural_eq(&value(&1i64)));
    assert!(!value(&1i32).structural_eq(&value(&1u32)));
    assert!(!value(&1.0f32).structural_eq(&value(&1.0f64)));
    assert!(!value(&'a').structural_eq(&value("a")));
    assert!(value("a").structural_eq(&value(&String::from("a"))));
}

#[test]
fn test_records() {
    #[derive(Serialize)]
    struct Other {
        x: i32,
        y: i32,
    }

    assert!(value(&Point { x: 1, y: 2 }).structural_eq(&value(&Point { x: 1, y: 2 })));
    assert!(!value(&Point { x: 1, y: 2 }).structural_eq(&value(&Point { x: 2, y: 1 })));
    assert!(!value(&Point { x: 1, y: 2 }).structural_eq(&value(&Other { x: 1, y: 2 })));
    assert!(!value(&Shape::Circle(1.0)).structural_eq(&value(&Shape::Empty)));
    assert!(!value(&Pair(1, 2)).structural_eq(&value(&(1, 2))));
}

#[test]
fn test_nan_equality_is_configurable() {
    let mut options = Options::default();
    let nan = value(&f64::NAN);
    assert!(Value::eq_with(&nan, &nan, &options));

    options.set_nan_equal(false);
    assert!(!Value::eq_with(&nan, &nan, &options));
}

#[test]
fn test_absent() {
    assert!(value(&None::<i32>).is_absent());
    assert!(!value(&Some(1)).is_absent());
    assert!(!value(&Some(None::<i32>)).is_absent());
    assert!(!value(&0).is_absent());
    assert!(!value(&()).is_absent());

    assert!(value(&None::<i32>).structural_eq(&value(&None::<String>)));
    assert!(!value(&None::<i32>).structural_eq(&value(&Some(1))));
    assert!(!value(&Some(1)).structural_eq(&value(&None::<i32>)));
}

#[test]
fn test_empty() {
    let mut map = HashMap::new();
    assert!(value(&map).is_empty());
    map.insert(1, 2);
    assert!(!value(&map).is_empty());

    assert!(value(&None::<i32>).is_empty());
    assert!(value(&Vec::<i32>::new()).is_empty());
    assert!(value("").is_empty());
    assert!(value(&Some(String::new())).is_empty());
    assert!(value(&Meters(vec![])).is_empty());
    assert!(!value(&0).is_empty());
    assert!(!value(&0.0).is_empty());
    assert!(!value(&false).is_empty());
    assert!(!value(&Point { x: 0, y: 0 }).is_empty());
    assert!(!value(&vec![0]).is_empty());
}

#[test]
fn test_len() {
    assert_eq!(value(&vec![1, 2, 3]).len(), Some(3));
    assert_eq!(value(&[0u8; 4]).len(), Some(4));
    assert_eq!(value("héllo").len(), Some(6));
    assert_eq!(value(&HashMap::from([(1, 2)])).len(), Some(1));
    assert_eq!(value(&Meters(vec![1, 2])).len(), Some(2));
    assert_eq!(value(&1).len(), None);
    assert_eq!(value(&Some(vec![1])).len(), None);
    assert_eq!(value(&None::<Vec<i32>>).len(), None);
    assert_eq!(value(&Point { x: 1, y: 2 }).len(), None);
}

#[test]
fn test_depth_limit() {
    let mut options = Options::default();
    options.set_max_depth(2);

    assert!(to_value_with(&vec![vec![1]], &options).is_ok());

    assert!(matches!(
        to_value_with(&vec![vec![vec![1]]], &options),
        Err(Error::DepthLimit { limit: 2 })
    ));
}

#[test]
fn test_cycles_hit_depth_limit() {
    #[derive(Serialize)]
    struct Node {
        next: Option<Rc<RefCell<Node>>>,
    }

    let node = Rc::new(RefCell::new(Node { next: None }));
    node.borrow_mut().next = Some(node.clone());

    let result = to_value(&node);
    node.borrow_mut().next = None;
    assert!(matches!(result, Err(Error::DepthLimit { .. })));
}

#[test]
fn test_debug() {
    assert_eq!(format!("{:?}", value(&vec![1, 2])), "[1, 2]");
    assert_eq!(format!("{:?}", value("a")), "\"a\"");
    assert_eq!(format!("{:?}", value(&Some(1))), "Some(1)");
    assert_eq!(format!("{:?}", value(&None::<i32>)), "None");
    assert_eq!(format!("{:?}", value(&Point { x: 1, y: 2 })), "Point { x: 1, y: 2 }");
    assert_eq!(format!("{:?}", value(&Shape::Circle(1.5))), "Circle(1.5)");
    assert_eq!(format!("{:?}", value(&HashMap::from([("a", 1)]))), "{\"a\": 1}");
}

#[test]
fn test_display() {
    assert_eq!(value("a").to_string(), "a");
    assert_eq!(value(&'c').to_string(), "c");
    assert_eq!(value(&1.5).to_string(), "1.5");
    assert_eq!(value(&vec!["a"]).to_string(), "[\"a\"]");
}

#[test]
fn test_type_info() {
    assert_eq!(value(&1u8).type_info().to_string(), "u8");
    assert_eq!(value("a").type_info().to_string(), "String");
    assert_eq!(value(&Point { x: 1, y: 2 }).type_info().to_string(), "struct Point");
    assert_eq!(value(&Shape::Empty).type_info().to_string(), "enum Shape");
}

#[test]
fn test_value_round_trips_through_itself() {
    let original = value(&Shape::Rect { w: 1, h: 2 });
    assert!(value(&original).structural_eq(&original));

    let original = value(&vec![Some(1u8), None]);
    assert!(value(&original).structural_eq(&original));
}

#[test]
fn test_integer_to_char() {
    assert_eq!(Integer::U8(b'a').to_char(), Some('a'));
    assert_eq!(Integer::I32(-1).to_char(), None);
}

#[test]
fn test_free_functions() {
    let options = Options::default();
    assert!(crate::runtime::equal(&vec![1], &[1], &options).unwrap());
    assert!(!crate::runtime::equal(&1u8, &1i8, &options).unwrap());
    assert!(crate::runtime::is_nil(&None::<u8>, &options).unwrap());
    assert!(crate::runtime::is_empty("", &options).unwrap());
    assert_eq!(crate::runtime::len("ab", &options).unwrap(), Some(2));
}
