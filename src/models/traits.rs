use crate::models::adapters::AdapterError;
use crate::models::commands::CommandError;
use crate::models::common::*;

/// 移動可能なオブジェクトのインターフェース
pub trait IMovable {
    /// 現在位置の取得
    fn get_location(&self) -> Result<Point, AdapterError>;

    /// 現在の速度ベクトルの取得
    fn get_velocity(&self) -> Result<Vector, AdapterError>;

    /// 位置の設定
    fn set_location(&self, location: Point);
}

/// 回転可能なオブジェクトのインターフェース
pub trait IRotatable {
    /// 現在の向きの取得
    fn get_angle(&self) -> Result<Angle, AdapterError>;

    /// 向きの設定
    fn set_angle(&self, angle: Angle);
}

/// 全てのコマンドが実装する基本インターフェース
pub trait ICommand {
    /// コマンドの実行
    fn execute(&mut self) -> Result<(), CommandError>;

    /// コマンド名（マクロコマンドのエラー報告・ログ用）
    fn name(&self) -> &'static str;
}

impl<T: IMovable + ?Sized> IMovable for &T {
    fn get_location(&self) -> Result<Point, AdapterError> {
        (**self).get_location()
    }

    fn get_velocity(&self) -> Result<Vector, AdapterError> {
        (**self).get_velocity()
    }

    fn set_location(&self, location: Point) {
        (**self).set_location(location)
    }
}

impl<T: IRotatable + ?Sized> IRotatable for &T {
    fn get_angle(&self) -> Result<Angle, AdapterError> {
        (**self).get_angle()
    }

    fn set_angle(&self, angle: Angle) {
        (**self).set_angle(angle)
    }
}
