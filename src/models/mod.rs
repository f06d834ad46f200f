// 基本的なデータ型と数学ユーティリティ
pub mod common;

// 名前付きプロパティのストア
pub mod uobject;

// 能力インターフェース（trait）定義
pub mod traits;

// UObject を能力インターフェースとして見せるアダプター
pub mod adapters;

// アダプター越しに状態を変更するアクション
pub mod actions;

// アクションと燃料処理のコマンド化
pub mod commands;

// 便利な re-export
pub use common::*;
pub use traits::*;
pub use uobject::{Property, PropertyTypeError, UObject, names};
pub use adapters::{AdapterError, MovableAdapter, RotatableAdapter};
pub use actions::{Move, Rotate};
pub use commands::{
    BurnFuelCommand, CheckFuelCommand, Command, CommandError, MacroCommand,
    ModifyVelocityOnRotateCommand, MoveCommand, MoveWithFuelMacroCommand, RotateCommand,
    RotateWithVelocityMacroCommand,
};
