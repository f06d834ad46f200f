//! # UObject モジュール
//!
//! 1つのエンティティ（宇宙船など）の可変状態を保持する、名前付きプロパティの入れ物です。
//!
//! 値は [`Property`] で型付けされますが、どの名前にどの型を入れるかは
//! 呼び出し側（アダプターやコマンド）の取り決めであり、ストア自体は検査しません。
//! 存在しないキーの読み出しはエラーではなく `None` を返します。
//!
//! `UObject` はハンドルです。`clone()` したハンドルは同じ内部マップを共有するため、
//! 同じ船から作ったアダプターとコマンドは常に同じ状態を観測します。

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use thiserror::Error;

use crate::models::common::{Angle, Point, Vector};

/// 慣例的なプロパティ名
pub mod names {
    pub const LOCATION: &str = "location";
    pub const ANGLE: &str = "angle";
    pub const VELOCITY: &str = "velocity";
    pub const VELOCITY_VECTOR: &str = "velocity_vector";
    pub const FUEL: &str = "fuel";
    pub const FUEL_BURN_RATE: &str = "fuel_burn_rate";
}

/// プロパティ値
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Property {
    Point(Point),
    Vector(Vector),
    Angle(Angle),
    Float(f64),
    Int(i64),
}

impl Property {
    /// 値の種類名（エラーメッセージ用）
    pub fn kind(&self) -> &'static str {
        match self {
            Property::Point(_) => "point",
            Property::Vector(_) => "vector",
            Property::Angle(_) => "angle",
            Property::Float(_) => "float",
            Property::Int(_) => "int",
        }
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Property::Point(p) => write!(f, "{}", p),
            Property::Vector(v) => write!(f, "{}", v),
            Property::Angle(a) => write!(f, "{}", a),
            Property::Float(x) => write!(f, "{:.2}", x),
            Property::Int(n) => write!(f, "{}", n),
        }
    }
}

impl From<Point> for Property {
    fn from(p: Point) -> Self {
        Property::Point(p)
    }
}

impl From<Vector> for Property {
    fn from(v: Vector) -> Self {
        Property::Vector(v)
    }
}

impl From<Angle> for Property {
    fn from(a: Angle) -> Self {
        Property::Angle(a)
    }
}

impl From<f64> for Property {
    fn from(x: f64) -> Self {
        Property::Float(x)
    }
}

impl From<i64> for Property {
    fn from(n: i64) -> Self {
        Property::Int(n)
    }
}

/// 期待と異なる種類の値が格納されていた
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("property '{name}' holds {found}, expected {expected}")]
pub struct PropertyTypeError {
    pub name: String,
    pub expected: &'static str,
    pub found: &'static str,
}

/// 名前付きプロパティの共有ストア
#[derive(Debug, Clone, Default)]
pub struct UObject {
    properties: Arc<RwLock<HashMap<String, Property>>>,
}

macro_rules! typed_getter {
    ($fn_name:ident, $variant:ident, $ty:ty, $kind:literal) => {
        pub fn $fn_name(&self, name: &str) -> Result<Option<$ty>, PropertyTypeError> {
            match self.get_property(name) {
                None => Ok(None),
                Some(Property::$variant(value)) => Ok(Some(value)),
                Some(other) => Err(PropertyTypeError {
                    name: name.to_string(),
                    expected: $kind,
                    found: other.kind(),
                }),
            }
        }
    };
}

impl UObject {
    pub fn new() -> Self {
        Self::default()
    }

    /// プロパティを取得（存在しなければ `None`）
    pub fn get_property(&self, name: &str) -> Option<Property> {
        let properties = self.properties.read().unwrap_or_else(PoisonError::into_inner);
        properties.get(name).copied()
    }

    /// プロパティを設定（上書き可、型検査なし）
    pub fn set_property(&self, name: &str, value: impl Into<Property>) {
        let mut properties = self.properties.write().unwrap_or_else(PoisonError::into_inner);
        properties.insert(name.to_string(), value.into());
    }

    pub fn contains(&self, name: &str) -> bool {
        let properties = self.properties.read().unwrap_or_else(PoisonError::into_inner);
        properties.contains_key(name)
    }

    /// 格納されているプロパティ名（ソート済み）
    pub fn property_names(&self) -> Vec<String> {
        let properties = self.properties.read().unwrap_or_else(PoisonError::into_inner);
        let mut names: Vec<String> = properties.keys().cloned().collect();
        names.sort();
        names
    }

    typed_getter!(get_point, Point, Point, "point");
    typed_getter!(get_vector, Vector, Vector, "vector");
    typed_getter!(get_angle, Angle, Angle, "angle");
    typed_getter!(get_float, Float, f64, "float");
    typed_getter!(get_int, Int, i64, "int");
}
