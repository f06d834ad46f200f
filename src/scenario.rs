use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// シナリオメタデータ
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScenarioMeta {
    pub version: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct Position2D {
    pub x: i32,
    pub y: i32,
}

/// 宇宙船の初期状態
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ShipConfig {
    pub location: Position2D,
    pub angle_deg: i32,
    pub velocity: f64,
    #[serde(default)]
    pub fuel: Option<i64>,
    #[serde(default)]
    pub fuel_burn_rate: Option<i64>,
}

/// 命令（1つのコマンドに対応）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OrderConfig {
    Move,
    Rotate { delta_deg: i32 },
    CheckFuel,
    BurnFuel,
    ModifyVelocity,
    MoveWithFuel,
    RotateWithVelocity { delta_deg: i32 },
}

impl OrderConfig {
    /// ログ表示用のラベル
    pub fn label(&self) -> String {
        match self {
            OrderConfig::Move => "move".to_string(),
            OrderConfig::Rotate { delta_deg } => format!("rotate {:+}°", delta_deg),
            OrderConfig::CheckFuel => "check_fuel".to_string(),
            OrderConfig::BurnFuel => "burn_fuel".to_string(),
            OrderConfig::ModifyVelocity => "modify_velocity".to_string(),
            OrderConfig::MoveWithFuel => "move_with_fuel".to_string(),
            OrderConfig::RotateWithVelocity { delta_deg } => {
                format!("rotate_with_velocity {:+}°", delta_deg)
            }
        }
    }
}

/// 完全なシナリオ設定
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScenarioConfig {
    pub meta: ScenarioMeta,
    pub ship: ShipConfig,
    pub orders: Vec<OrderConfig>,
}

impl ScenarioConfig {
    /// YAMLファイルからシナリオ設定を読み込み
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ScenarioError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ScenarioError::FileNotFound(path.to_path_buf()));
        }

        let contents = fs::read_to_string(path)
            .map_err(|e| ScenarioError::IoError(path.to_path_buf(), e))?;

        let config: ScenarioConfig = serde_yaml::from_str(&contents)
            .map_err(|e| ScenarioError::ParseError(path.to_path_buf(), e))?;

        config.validate()?;

        Ok(config)
    }

    /// YAML文字列からシナリオ設定を読み込み
    pub fn from_yaml_str(contents: &str) -> Result<Self, ScenarioError> {
        let config: ScenarioConfig = serde_yaml::from_str(contents)
            .map_err(|e| ScenarioError::ParseError(PathBuf::from("<inline>"), e))?;
        config.validate()?;
        Ok(config)
    }

    /// 組み込みのデモシナリオ（移動 → +15°回転 → 移動）
    pub fn default_demo() -> Self {
        Self {
            meta: ScenarioMeta {
                version: "1.0".to_string(),
                name: "demo".to_string(),
                description: "組み込みデモ: 移動・回転・再移動".to_string(),
            },
            ship: ShipConfig {
                location: Position2D { x: 12, y: 5 },
                angle_deg: 45,
                velocity: 10.0,
                fuel: None,
                fuel_burn_rate: None,
            },
            orders: vec![
                OrderConfig::Move,
                OrderConfig::Rotate { delta_deg: 15 },
                OrderConfig::Move,
            ],
        }
    }

    /// 設定の基本的な検証
    pub fn validate(&self) -> Result<(), ScenarioError> {
        if !self.ship.velocity.is_finite() || self.ship.velocity < 0.0 {
            return Err(ScenarioError::ValidationError(format!(
                "velocity must be a finite non-negative number, got {}",
                self.ship.velocity
            )));
        }
        if let Some(fuel) = self.ship.fuel {
            if fuel < 0 {
                return Err(ScenarioError::ValidationError(format!(
                    "fuel must not be negative, got {}",
                    fuel
                )));
            }
        }
        if let Some(rate) = self.ship.fuel_burn_rate {
            if rate < 0 {
                return Err(ScenarioError::ValidationError(format!(
                    "fuel_burn_rate must not be negative, got {}",
                    rate
                )));
            }
        }
        if self.orders.is_empty() {
            return Err(ScenarioError::ValidationError("orders must not be empty".to_string()));
        }

        Ok(())
    }

    /// シナリオの概要を表示
    pub fn print_summary(&self) {
        println!("=== シナリオ情報 ===");
        println!("名前: {}", self.meta.name);
        println!("説明: {}", self.meta.description);
        println!("バージョン: {}", self.meta.version);
        println!();

        println!("=== 初期状態 ===");
        println!("位置: ({}, {})", self.ship.location.x, self.ship.location.y);
        println!("向き: {}°", self.ship.angle_deg);
        println!("速さ: {:.2}", self.ship.velocity);
        match (self.ship.fuel, self.ship.fuel_burn_rate) {
            (Some(fuel), Some(rate)) => println!("燃料: {} (消費量 {}/回)", fuel, rate),
            _ => println!("燃料: 未設定"),
        }
        println!();

        println!("=== 命令 ({}件) ===", self.orders.len());
        for (i, order) in self.orders.iter().enumerate() {
            println!("  {:>2}: {}", i + 1, order.label());
        }
    }
}

/// シナリオ読み込みエラー
#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("シナリオファイルが見つかりません: {}", .0.display())]
    FileNotFound(PathBuf),
    #[error("ファイル読み込みエラー {}: {}", .0.display(), .1)]
    IoError(PathBuf, #[source] std::io::Error),
    #[error("YAML解析エラー {}: {}", .0.display(), .1)]
    ParseError(PathBuf, #[source] serde_yaml::Error),
    #[error("設定検証エラー: {0}")]
    ValidationError(String),
}
