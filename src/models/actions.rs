use crate::models::{
    adapters::AdapterError,
    common::Angle,
    traits::{IMovable, IRotatable},
};

/// 直進アクション
///
/// 現在位置に速度ベクトルを加えた位置を書き戻す。
#[derive(Debug, Clone)]
pub struct Move<M: IMovable> {
    movable: M,
}

impl<M: IMovable> Move<M> {
    pub fn new(movable: M) -> Self {
        Self { movable }
    }

    pub fn execute(&self) -> Result<(), AdapterError> {
        let location = self.movable.get_location()?;
        let velocity = self.movable.get_velocity()?;
        self.movable.set_location(location + velocity);
        Ok(())
    }
}

/// 回転アクション
///
/// 結果の角度は正規化しない。
#[derive(Debug, Clone)]
pub struct Rotate<R: IRotatable> {
    rotatable: R,
}

impl<R: IRotatable> Rotate<R> {
    pub fn new(rotatable: R) -> Self {
        Self { rotatable }
    }

    pub fn execute(&self, delta: Angle) -> Result<(), AdapterError> {
        let angle = self.rotatable.get_angle()?;
        self.rotatable.set_angle(angle + delta);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::common::{Point, Vector};
    use std::cell::{Cell, RefCell};

    /// 呼び出しを記録するモック
    struct MockMovable {
        location: Option<Point>,
        velocity: Vector,
        written: RefCell<Vec<Point>>,
    }

    impl IMovable for MockMovable {
        fn get_location(&self) -> Result<Point, AdapterError> {
            self.location.ok_or(AdapterError::MissingProperty("location"))
        }

        fn get_velocity(&self) -> Result<Vector, AdapterError> {
            Ok(self.velocity)
        }

        fn set_location(&self, location: Point) {
            self.written.borrow_mut().push(location);
        }
    }

    struct MockRotatable {
        angle: Cell<Angle>,
        set_calls: Cell<u32>,
    }

    impl IRotatable for MockRotatable {
        fn get_angle(&self) -> Result<Angle, AdapterError> {
            Ok(self.angle.get())
        }

        fn set_angle(&self, angle: Angle) {
            self.angle.set(angle);
            self.set_calls.set(self.set_calls.get() + 1);
        }
    }

    #[test]
    fn test_move_adds_velocity_to_location() {
        let mock = MockMovable {
            location: Some(Point::new(10, 20)),
            velocity: Vector::new(5, -3),
            written: RefCell::new(Vec::new()),
        };
        let action = Move::new(&mock);
        action.execute().unwrap();
        assert_eq!(*mock.written.borrow(), vec![Point::new(15, 17)]);
    }

    #[test]
    fn test_move_without_location_writes_nothing() {
        let mock = MockMovable {
            location: None,
            velocity: Vector::new(1, 1),
            written: RefCell::new(Vec::new()),
        };
        let result = Move::new(&mock).execute();
        assert_eq!(result, Err(AdapterError::MissingProperty("location")));
        assert!(mock.written.borrow().is_empty());
    }

    #[test]
    fn test_rotate() {
        let mock = MockRotatable {
            angle: Cell::new(Angle::new(30)),
            set_calls: Cell::new(0),
        };
        Rotate::new(&mock).execute(Angle::new(15)).unwrap();
        assert_eq!(mock.angle.get(), Angle::new(45));
        assert_eq!(mock.set_calls.get(), 1);
    }

    #[test]
    fn test_rotate_negative_and_not_normalized() {
        let mock = MockRotatable {
            angle: Cell::new(Angle::new(45)),
            set_calls: Cell::new(0),
        };
        let rotate = Rotate::new(&mock);
        rotate.execute(Angle::new(-20)).unwrap();
        assert_eq!(mock.angle.get(), Angle::new(25));

        rotate.execute(Angle::new(-50)).unwrap();
        assert_eq!(mock.angle.get(), Angle::new(-25));
        assert_eq!(mock.set_calls.get(), 2);
    }
}
