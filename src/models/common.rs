use std::fmt;
use std::ops::{Add, Sub};

/// 2次元の整数位置を表す構造体
///
/// ベクトルとの加算は i32 の範囲で折り返す（パニックしない）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl Add<Vector> for Point {
    type Output = Self;

    fn add(self, v: Vector) -> Self::Output {
        Self::new(self.x.wrapping_add(v.x), self.y.wrapping_add(v.y))
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// 2次元の整数ベクトル（変位・速度サンプル）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Vector {
    pub x: i32,
    pub y: i32,
}

impl Vector {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// 速さと向きから速度ベクトルを求める
    ///
    /// 各成分は `speed·cos θ`, `speed·sin θ` を0方向へ切り捨てた整数。
    /// 移動アダプターと速度ベクトル再計算コマンドの両方がこの式を使う。
    pub fn from_polar(speed: f64, angle: Angle) -> Self {
        let rad = angle.radians();
        Self::new(
            (speed * rad.cos()).trunc() as i32,
            (speed * rad.sin()).trunc() as i32,
        )
    }
}

impl Add for Vector {
    type Output = Self;

    fn add(self, other: Self) -> Self::Output {
        Self::new(self.x.wrapping_add(other.x), self.y.wrapping_add(other.y))
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}, {}>", self.x, self.y)
    }
}

/// 向き（整数の度）
///
/// 生成時には正規化しない。比較も生の度数で行うため、
/// [0, 360) で比較したい場合は呼び出し側で [`Angle::normalized`] を使うこと。
/// 加減算は i32 の範囲で折り返す。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Angle {
    pub degrees: i32,
}

impl Angle {
    pub fn new(degrees: i32) -> Self {
        Self { degrees }
    }

    /// ラジアンに変換
    pub fn radians(&self) -> f64 {
        math_utils::deg_to_rad(self.degrees as f64)
    }

    /// [0, 360) の範囲に正規化（床除算の剰余）
    pub fn normalized(&self) -> Self {
        Self::new(self.degrees.rem_euclid(360))
    }
}

/// `Angle` の加減算で受け付けるオペランド
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AngleOperand {
    Angle(Angle),
    Raw(i32),
}

impl AngleOperand {
    fn degrees(self) -> i32 {
        match self {
            AngleOperand::Angle(a) => a.degrees,
            AngleOperand::Raw(d) => d,
        }
    }
}

impl From<Angle> for AngleOperand {
    fn from(a: Angle) -> Self {
        AngleOperand::Angle(a)
    }
}

impl From<i32> for AngleOperand {
    fn from(d: i32) -> Self {
        AngleOperand::Raw(d)
    }
}

impl<T: Into<AngleOperand>> Add<T> for Angle {
    type Output = Self;

    fn add(self, other: T) -> Self::Output {
        Self::new(self.degrees.wrapping_add(other.into().degrees()))
    }
}

impl<T: Into<AngleOperand>> Sub<T> for Angle {
    type Output = Self;

    fn sub(self, other: T) -> Self::Output {
        Self::new(self.degrees.wrapping_sub(other.into().degrees()))
    }
}

impl PartialEq<i32> for Angle {
    fn eq(&self, other: &i32) -> bool {
        self.degrees == *other
    }
}

impl fmt::Display for Angle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°", self.degrees)
    }
}

/// 数学ユーティリティ関数
pub mod math_utils {
    /// 度をラジアンに変換
    pub fn deg_to_rad(degrees: f64) -> f64 {
        degrees * std::f64::consts::PI / 180.0
    }
}
