//! # Simulation モジュール
//!
//! シナリオの命令列を1つずつコマンドに変換し、宇宙船オブジェクトに対して実行します。
//!
//! ## 実行の流れ
//!
//! 1. **初期化**: シナリオの `ship` 節から `UObject` にプロパティを設定
//! 2. **命令実行**: 各命令を対応するコマンドとして生成し `execute()`
//! 3. **状態記録**: 各ステップ後の状態を tracing で出力
//!
//! `stop_on_error` が有効な場合は最初に失敗した命令で停止し、そのエラーを返します。
//! 無効な場合は失敗を記録して次の命令へ進みます。
//!
//! ## 使用例
//!
//! ```rust
//! use shipsim::scenario::ScenarioConfig;
//! use shipsim::simulation::SimulationEngine;
//!
//! let mut engine = SimulationEngine::new(ScenarioConfig::default_demo(), false);
//! let report = engine.run().expect("demo scenario runs");
//! assert_eq!(report.executed, 3);
//! ```

use std::fmt;

use tracing::{debug, info, trace, warn};

use crate::models::*;
use crate::scenario::*;

/// 実行結果の集計
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunReport {
    pub executed: usize,
    pub failed: usize,
}

/// 表示用の宇宙船状態スナップショット
#[derive(Debug, Clone, PartialEq)]
pub struct ShipSnapshot {
    pub location: Option<Point>,
    pub angle: Option<Angle>,
    pub velocity: Option<f64>,
    pub velocity_vector: Option<Vector>,
    pub fuel: Option<i64>,
}

impl fmt::Display for ShipSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn field<T: fmt::Display>(value: &Option<T>) -> String {
            value.as_ref().map_or_else(|| "-".to_string(), |v| v.to_string())
        }
        write!(
            f,
            "location: {}, angle: {}, velocity: {}, velocity_vector: {}, fuel: {}",
            field(&self.location),
            field(&self.angle),
            self.velocity.map_or_else(|| "-".to_string(), |v| format!("{:.2}", v)),
            field(&self.velocity_vector),
            field(&self.fuel),
        )
    }
}

pub struct SimulationEngine {
    pub ship: UObject,
    pub step_count: usize,
    pub scenario_config: ScenarioConfig,
    pub stop_on_error: bool,
}

impl SimulationEngine {
    pub fn new(scenario: ScenarioConfig, stop_on_error: bool) -> Self {
        let ship = UObject::new();
        let cfg = &scenario.ship;

        ship.set_property(names::LOCATION, Point::new(cfg.location.x, cfg.location.y));
        ship.set_property(names::ANGLE, Angle::new(cfg.angle_deg));
        ship.set_property(names::VELOCITY, cfg.velocity);
        if let Some(fuel) = cfg.fuel {
            ship.set_property(names::FUEL, fuel);
        }
        if let Some(rate) = cfg.fuel_burn_rate {
            ship.set_property(names::FUEL_BURN_RATE, rate);
        }

        Self {
            ship,
            step_count: 0,
            scenario_config: scenario,
            stop_on_error,
        }
    }

    /// 現在の状態のスナップショット
    ///
    /// 型の合わない値は欠損として扱う。
    pub fn snapshot(&self) -> ShipSnapshot {
        ShipSnapshot {
            location: self.ship.get_point(names::LOCATION).ok().flatten(),
            angle: self.ship.get_angle(names::ANGLE).ok().flatten(),
            velocity: self.ship.get_float(names::VELOCITY).ok().flatten(),
            velocity_vector: self.ship.get_vector(names::VELOCITY_VECTOR).ok().flatten(),
            fuel: self.ship.get_int(names::FUEL).ok().flatten(),
        }
    }

    /// ストア内の全プロパティを `name=value` 形式で列挙（名前順）
    ///
    /// スナップショットに含まれない `fuel_burn_rate` なども含む。
    pub fn state_dump(&self) -> String {
        self.ship
            .property_names()
            .iter()
            .filter_map(|name| {
                self.ship
                    .get_property(name)
                    .map(|value| format!("{}={}", name, value))
            })
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// 命令に対応するコマンドを生成
    pub fn build_command(&self, order: &OrderConfig) -> Box<dyn ICommand> {
        match *order {
            OrderConfig::Move => Box::new(MoveCommand::new(MovableAdapter::new(&self.ship))),
            OrderConfig::Rotate { delta_deg } => Box::new(RotateCommand::new(
                RotatableAdapter::new(&self.ship),
                Angle::new(delta_deg),
            )),
            OrderConfig::CheckFuel => Box::new(CheckFuelCommand::new(&self.ship)),
            OrderConfig::BurnFuel => Box::new(BurnFuelCommand::new(&self.ship)),
            OrderConfig::ModifyVelocity => Box::new(ModifyVelocityOnRotateCommand::new(&self.ship)),
            OrderConfig::MoveWithFuel => Box::new(MoveWithFuelMacroCommand::new(&self.ship)),
            OrderConfig::RotateWithVelocity { delta_deg } => Box::new(
                RotateWithVelocityMacroCommand::new(&self.ship, Angle::new(delta_deg)),
            ),
        }
    }

    pub fn run(&mut self) -> Result<RunReport, CommandError> {
        info!("=== シナリオ実行開始: {} ===", self.scenario_config.meta.name);
        info!("初期状態: {}", self.snapshot());
        trace!(properties = %self.state_dump(), "初期プロパティ");

        let orders = self.scenario_config.orders.clone();
        let mut report = RunReport::default();

        for order in &orders {
            self.step_count += 1;
            let mut command = self.build_command(order);
            debug!(step = self.step_count, command = command.name(), "命令を実行");

            match command.execute() {
                Ok(()) => {
                    report.executed += 1;
                    info!("[{}] {} 後: {}", self.step_count, order.label(), self.snapshot());
                }
                Err(err) => {
                    report.failed += 1;
                    warn!(
                        cause = %err.root_cause(),
                        "[{}] {} 失敗: {}",
                        self.step_count,
                        order.label(),
                        err
                    );
                    if self.stop_on_error {
                        return Err(err);
                    }
                }
            }
            trace!(step = self.step_count, properties = %self.state_dump(), "プロパティ");
        }

        info!("=== シナリオ完了 ===");
        info!("成功: {}件, 失敗: {}件", report.executed, report.failed);

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario(ship: ShipConfig, orders: Vec<OrderConfig>) -> ScenarioConfig {
        ScenarioConfig {
            meta: ScenarioMeta {
                version: "1.0".to_string(),
                name: "test".to_string(),
                description: String::new(),
            },
            ship,
            orders,
        }
    }

    fn ship(fuel: Option<i64>, fuel_burn_rate: Option<i64>) -> ShipConfig {
        ShipConfig {
            location: Position2D { x: 0, y: 0 },
            angle_deg: 0,
            velocity: 5.0,
            fuel,
            fuel_burn_rate,
        }
    }

    #[test]
    fn test_initial_snapshot() {
        let config = scenario(ship(Some(10), Some(2)), vec![OrderConfig::Move]);
        let engine = SimulationEngine::new(config, false);
        let snapshot = engine.snapshot();
        assert_eq!(snapshot.location, Some(Point::new(0, 0)));
        assert_eq!(snapshot.angle, Some(Angle::new(0)));
        assert_eq!(snapshot.velocity, Some(5.0));
        assert_eq!(snapshot.velocity_vector, None);
        assert_eq!(snapshot.fuel, Some(10));
        assert!(snapshot.to_string().contains("velocity_vector: -"));
    }

    #[test]
    fn test_move_rotate_move() {
        let orders = vec![
            OrderConfig::Move,
            OrderConfig::Rotate { delta_deg: 90 },
            OrderConfig::Move,
        ];
        let mut engine = SimulationEngine::new(scenario(ship(None, None), orders), true);
        let report = engine.run().unwrap();

        assert_eq!(report, RunReport { executed: 3, failed: 0 });
        assert_eq!(engine.snapshot().location, Some(Point::new(5, 5)));
        assert_eq!(engine.snapshot().angle, Some(Angle::new(90)));
    }

    #[test]
    fn test_fuel_runs_out() {
        let orders = vec![OrderConfig::MoveWithFuel; 3];
        let mut engine = SimulationEngine::new(scenario(ship(Some(5), Some(2)), orders), false);
        let report = engine.run().unwrap();

        assert_eq!(report, RunReport { executed: 2, failed: 1 });
        assert_eq!(engine.snapshot().location, Some(Point::new(10, 0)));
        assert_eq!(engine.snapshot().fuel, Some(1));
    }

    #[test]
    fn test_stop_on_error() {
        let orders = vec![OrderConfig::CheckFuel, OrderConfig::Move];
        let mut engine = SimulationEngine::new(scenario(ship(None, None), orders), true);
        let err = engine.run().unwrap_err();

        assert_eq!(err, CommandError::MissingFuelParameters);
        assert_eq!(engine.step_count, 1);
        assert_eq!(engine.snapshot().location, Some(Point::new(0, 0)));
    }

    #[test]
    fn test_rotate_with_velocity_updates_vector() {
        let orders = vec![OrderConfig::RotateWithVelocity { delta_deg: 90 }];
        let mut engine = SimulationEngine::new(scenario(ship(None, None), orders), true);
        engine.run().unwrap();
        assert_eq!(engine.snapshot().velocity_vector, Some(Vector::new(0, 5)));
    }

    #[test]
    fn test_state_dump_lists_every_property() {
        let config = scenario(ship(Some(10), Some(2)), vec![OrderConfig::Move]);
        let engine = SimulationEngine::new(config, false);
        assert_eq!(
            engine.state_dump(),
            "angle=0°, fuel=10, fuel_burn_rate=2, location=(0, 0), velocity=5.00"
        );
    }

    #[test]
    fn test_huge_velocity_wraps_location() {
        let mut config = ship(None, None);
        config.velocity = 1.0e10;
        let orders = vec![OrderConfig::Move, OrderConfig::Move];
        let mut engine = SimulationEngine::new(scenario(config, orders), true);
        let report = engine.run().unwrap();

        // 速度成分は i32::MAX で飽和し、2回目の移動で折り返す
        assert_eq!(report, RunReport { executed: 2, failed: 0 });
        assert_eq!(engine.snapshot().location, Some(Point::new(-2, 0)));
    }

    #[test]
    fn test_rotate_past_i32_max_wraps() {
        let mut config = ship(None, None);
        config.angle_deg = 2_147_483_600;
        let orders = vec![OrderConfig::Rotate { delta_deg: 100 }];
        let mut engine = SimulationEngine::new(scenario(config, orders), true);
        let report = engine.run().unwrap();

        assert_eq!(report, RunReport { executed: 1, failed: 0 });
        assert_eq!(engine.snapshot().angle, Some(Angle::new(-2_147_483_596)));
    }

    #[test]
    fn test_default_demo_runs() {
        let mut engine = SimulationEngine::new(ScenarioConfig::default_demo(), true);
        let report = engine.run().unwrap();
        assert_eq!(report.executed, 3);
        // (12,5) + (7,7) の後、60° では (5,8) ずつ進む
        assert_eq!(engine.snapshot().location, Some(Point::new(24, 20)));
        assert_eq!(engine.snapshot().angle, Some(Angle::new(60)));
    }
}
