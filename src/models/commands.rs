//! # Commands モジュール
//!
//! アクションや燃料処理を `execute() -> Result` の統一インターフェースで包むコマンド群です。
//!
//! ## 提供コマンド
//!
//! - [`CheckFuelCommand`]: 燃料が1回分の消費量以上あるか確認（副作用なし）
//! - [`BurnFuelCommand`]: 燃料を消費（0未満にはしない）
//! - [`MoveCommand`] / [`RotateCommand`]: アクションのラッパー
//! - [`ModifyVelocityOnRotateCommand`]: 現在の速さと向きから `velocity_vector` を再計算
//! - [`MacroCommand`]: 順番に実行し、最初の失敗で停止
//! - [`MoveWithFuelMacroCommand`]: 燃料確認 → 移動 → 燃料消費
//! - [`RotateWithVelocityMacroCommand`]: 回転 → 速度ベクトル再計算
//!
//! コマンドは実行をまたいだ内部状態を持ちません。結果は常に対象 `UObject` の
//! 現在の状態とコマンド自身のパラメータだけで決まります。

use thiserror::Error;
use tracing::debug;

use crate::models::{
    actions::{Move, Rotate},
    adapters::{AdapterError, MovableAdapter, RotatableAdapter},
    common::{Angle, Vector},
    traits::{ICommand, IMovable, IRotatable},
    uobject::{PropertyTypeError, UObject, names},
};

/// コマンド実行エラー
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CommandError {
    #[error("command failed: fuel parameters are not set (fuel or fuel_burn_rate)")]
    MissingFuelParameters,
    #[error("command failed: not enough fuel to move (fuel {fuel}, burn rate {burn_rate})")]
    InsufficientFuel { fuel: i64, burn_rate: i64 },
    #[error("command failed: {0}")]
    Action(#[from] AdapterError),
    #[error("command failed: {0}")]
    Property(#[from] PropertyTypeError),
    #[error("command failed: macro command stopped at {step}: {source}")]
    MacroStep {
        step: &'static str,
        #[source]
        source: Box<CommandError>,
    },
}

impl CommandError {
    /// マクロのラップを剥がした最初の原因
    pub fn root_cause(&self) -> &CommandError {
        match self {
            CommandError::MacroStep { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

/// 任意のコマンドを包む透過ラッパー
pub struct Command {
    command: Box<dyn ICommand>,
}

impl Command {
    pub fn new(command: Box<dyn ICommand>) -> Self {
        Self { command }
    }

    /// 包んでいるコマンド
    pub fn inner(&self) -> &dyn ICommand {
        &*self.command
    }
}

impl ICommand for Command {
    fn execute(&mut self) -> Result<(), CommandError> {
        self.command.execute()
    }

    fn name(&self) -> &'static str {
        self.command.name()
    }
}

pub struct MacroCommand {
    commands: Vec<Box<dyn ICommand>>,
}

impl MacroCommand {
    pub fn new(commands: Vec<Box<dyn ICommand>>) -> Self {
        Self { commands }
    }
}

impl ICommand for MacroCommand {
    fn execute(&mut self) -> Result<(), CommandError> {
        for command in &mut self.commands {
            if let Err(err) = command.execute() {
                debug!(step = command.name(), error = %err, "マクロコマンドを中断");
                return Err(CommandError::MacroStep {
                    step: command.name(),
                    source: Box::new(err),
                });
            }
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "MacroCommand"
    }
}

fn fuel_parameters(uobj: &UObject) -> Result<(i64, i64), CommandError> {
    let fuel = uobj.get_int(names::FUEL)?;
    let burn_rate = uobj.get_int(names::FUEL_BURN_RATE)?;
    match (fuel, burn_rate) {
        (Some(fuel), Some(burn_rate)) => Ok((fuel, burn_rate)),
        _ => Err(CommandError::MissingFuelParameters),
    }
}

pub struct CheckFuelCommand {
    uobj: UObject,
}

impl CheckFuelCommand {
    pub fn new(uobj: &UObject) -> Self {
        Self { uobj: uobj.clone() }
    }
}

impl ICommand for CheckFuelCommand {
    fn execute(&mut self) -> Result<(), CommandError> {
        let (fuel, burn_rate) = fuel_parameters(&self.uobj)?;
        if fuel < burn_rate {
            return Err(CommandError::InsufficientFuel { fuel, burn_rate });
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "CheckFuelCommand"
    }
}

pub struct BurnFuelCommand {
    uobj: UObject,
}

impl BurnFuelCommand {
    pub fn new(uobj: &UObject) -> Self {
        Self { uobj: uobj.clone() }
    }
}

impl ICommand for BurnFuelCommand {
    fn execute(&mut self) -> Result<(), CommandError> {
        let (fuel, burn_rate) = fuel_parameters(&self.uobj)?;
        let remaining = fuel.saturating_sub(burn_rate).max(0);
        self.uobj.set_property(names::FUEL, remaining);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "BurnFuelCommand"
    }
}

pub struct MoveCommand<M: IMovable = MovableAdapter> {
    action: Move<M>,
}

impl<M: IMovable> MoveCommand<M> {
    pub fn new(movable: M) -> Self {
        Self { action: Move::new(movable) }
    }
}

impl<M: IMovable> ICommand for MoveCommand<M> {
    fn execute(&mut self) -> Result<(), CommandError> {
        self.action.execute()?;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "MoveCommand"
    }
}

pub struct RotateCommand<R: IRotatable = RotatableAdapter> {
    action: Rotate<R>,
    delta: Angle,
}

impl<R: IRotatable> RotateCommand<R> {
    pub fn new(rotatable: R, delta: Angle) -> Self {
        Self {
            action: Rotate::new(rotatable),
            delta,
        }
    }

    pub fn delta(&self) -> Angle {
        self.delta
    }
}

impl<R: IRotatable> ICommand for RotateCommand<R> {
    fn execute(&mut self) -> Result<(), CommandError> {
        self.action.execute(self.delta)?;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "RotateCommand"
    }
}

pub struct ModifyVelocityOnRotateCommand {
    uobj: UObject,
}

impl ModifyVelocityOnRotateCommand {
    pub fn new(uobj: &UObject) -> Self {
        Self { uobj: uobj.clone() }
    }
}

impl ICommand for ModifyVelocityOnRotateCommand {
    fn execute(&mut self) -> Result<(), CommandError> {
        let speed = self.uobj.get_float(names::VELOCITY)?;
        let angle = self.uobj.get_angle(names::ANGLE)?;

        let (Some(speed), Some(angle)) = (speed, angle) else {
            return Ok(());
        };
        if speed == 0.0 {
            return Ok(());
        }

        self.uobj
            .set_property(names::VELOCITY_VECTOR, Vector::from_polar(speed, angle));
        Ok(())
    }

    fn name(&self) -> &'static str {
        "ModifyVelocityOnRotateCommand"
    }
}

/// 燃料確認 → 移動 → 燃料消費
pub struct MoveWithFuelMacroCommand {
    macro_command: MacroCommand,
}

impl MoveWithFuelMacroCommand {
    pub fn new(uobj: &UObject) -> Self {
        let commands: Vec<Box<dyn ICommand>> = vec![
            Box::new(CheckFuelCommand::new(uobj)),
            Box::new(MoveCommand::new(MovableAdapter::new(uobj))),
            Box::new(BurnFuelCommand::new(uobj)),
        ];
        Self {
            macro_command: MacroCommand::new(commands),
        }
    }
}

impl ICommand for MoveWithFuelMacroCommand {
    fn execute(&mut self) -> Result<(), CommandError> {
        self.macro_command.execute()
    }

    fn name(&self) -> &'static str {
        "MoveWithFuelMacroCommand"
    }
}

/// 回転 → 速度ベクトル再計算
pub struct RotateWithVelocityMacroCommand {
    macro_command: MacroCommand,
}

impl RotateWithVelocityMacroCommand {
    pub fn new(uobj: &UObject, delta: Angle) -> Self {
        let commands: Vec<Box<dyn ICommand>> = vec![
            Box::new(RotateCommand::new(RotatableAdapter::new(uobj), delta)),
            Box::new(ModifyVelocityOnRotateCommand::new(uobj)),
        ];
        Self {
            macro_command: MacroCommand::new(commands),
        }
    }
}

impl ICommand for RotateWithVelocityMacroCommand {
    fn execute(&mut self) -> Result<(), CommandError> {
        self.macro_command.execute()
    }

    fn name(&self) -> &'static str {
        "RotateWithVelocityMacroCommand"
    }
}
