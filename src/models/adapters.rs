use thiserror::Error;

use crate::models::{
    common::{Angle, Point, Vector},
    traits::{IMovable, IRotatable},
    uobject::{PropertyTypeError, UObject, names},
};

/// アダプター経由のアクセスで契約違反があった場合のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AdapterError {
    #[error("{0} property not found")]
    MissingProperty(&'static str),
    #[error(transparent)]
    WrongType(#[from] PropertyTypeError),
}

fn required<T>(
    value: Result<Option<T>, PropertyTypeError>,
    name: &'static str,
) -> Result<T, AdapterError> {
    value?.ok_or(AdapterError::MissingProperty(name))
}

/// `UObject` を [`IMovable`] として扱うアダプター
///
/// 速度ベクトルは保持せず、`angle` と `velocity`（速さ）から毎回求める。
#[derive(Debug, Clone)]
pub struct MovableAdapter {
    uobj: UObject,
}

impl MovableAdapter {
    pub fn new(uobj: &UObject) -> Self {
        Self { uobj: uobj.clone() }
    }
}

impl IMovable for MovableAdapter {
    fn get_location(&self) -> Result<Point, AdapterError> {
        required(self.uobj.get_point(names::LOCATION), names::LOCATION)
    }

    fn get_velocity(&self) -> Result<Vector, AdapterError> {
        let angle = required(self.uobj.get_angle(names::ANGLE), names::ANGLE)?;
        let speed = required(self.uobj.get_float(names::VELOCITY), names::VELOCITY)?;
        Ok(Vector::from_polar(speed, angle))
    }

    fn set_location(&self, location: Point) {
        self.uobj.set_property(names::LOCATION, location);
    }
}

/// `UObject` を [`IRotatable`] として扱うアダプター
#[derive(Debug, Clone)]
pub struct RotatableAdapter {
    uobj: UObject,
}

impl RotatableAdapter {
    pub fn new(uobj: &UObject) -> Self {
        Self { uobj: uobj.clone() }
    }
}

impl IRotatable for RotatableAdapter {
    fn get_angle(&self) -> Result<Angle, AdapterError> {
        required(self.uobj.get_angle(names::ANGLE), names::ANGLE)
    }

    fn set_angle(&self, angle: Angle) {
        self.uobj.set_property(names::ANGLE, angle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_location() {
        let obj = UObject::new();
        obj.set_property(names::LOCATION, Point::new(10, 20));
        let adapter = MovableAdapter::new(&obj);
        assert_eq!(adapter.get_location(), Ok(Point::new(10, 20)));
    }

    #[test]
    fn test_get_location_missing() {
        let adapter = MovableAdapter::new(&UObject::new());
        assert_eq!(adapter.get_location(), Err(AdapterError::MissingProperty("location")));
    }

    #[test]
    fn test_get_velocity_at_zero_degrees() {
        let obj = UObject::new();
        obj.set_property(names::ANGLE, Angle::new(0));
        obj.set_property(names::VELOCITY, 10.0);
        assert_eq!(MovableAdapter::new(&obj).get_velocity(), Ok(Vector::new(10, 0)));
    }

    #[test]
    fn test_get_velocity_at_ninety_degrees() {
        let obj = UObject::new();
        obj.set_property(names::ANGLE, Angle::new(90));
        obj.set_property(names::VELOCITY, 5.0);
        assert_eq!(MovableAdapter::new(&obj).get_velocity(), Ok(Vector::new(0, 5)));
    }

    #[test]
    fn test_get_velocity_missing_inputs() {
        let obj = UObject::new();
        obj.set_property(names::VELOCITY, 5.0);
        let adapter = MovableAdapter::new(&obj);
        assert_eq!(adapter.get_velocity(), Err(AdapterError::MissingProperty("angle")));

        let obj = UObject::new();
        obj.set_property(names::ANGLE, Angle::new(0));
        let adapter = MovableAdapter::new(&obj);
        assert_eq!(adapter.get_velocity(), Err(AdapterError::MissingProperty("velocity")));
    }

    #[test]
    fn test_get_velocity_wrong_type() {
        let obj = UObject::new();
        obj.set_property(names::ANGLE, Angle::new(0));
        obj.set_property(names::VELOCITY, 5_i64);
        let err = MovableAdapter::new(&obj).get_velocity().unwrap_err();
        assert!(matches!(err, AdapterError::WrongType(ref e) if e.name == "velocity"));
    }

    #[test]
    fn test_set_location_writes_through() {
        let obj = UObject::new();
        MovableAdapter::new(&obj).set_location(Point::new(100, 200));
        assert_eq!(obj.get_point(names::LOCATION), Ok(Some(Point::new(100, 200))));
    }

    #[test]
    fn test_rotatable_adapter() {
        let obj = UObject::new();
        let adapter = RotatableAdapter::new(&obj);
        assert_eq!(adapter.get_angle(), Err(AdapterError::MissingProperty("angle")));

        adapter.set_angle(Angle::new(90));
        assert_eq!(adapter.get_angle(), Ok(Angle::new(90)));
        assert_eq!(obj.get_angle(names::ANGLE), Ok(Some(Angle::new(90))));
    }
}
