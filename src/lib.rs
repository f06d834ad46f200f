//! # shipsim
//!
//! 名前付きプロパティを持つ宇宙船オブジェクトに対して、アダプター・アクション・コマンドを
//! 組み合わせて移動と回転を行う小さなオブジェクトモデルです。
//!
//! - [`models`]: 幾何型、プロパティストア、アダプター、アクション、コマンド
//! - [`scenario`]: YAML シナリオ（初期状態と命令列）
//! - [`simulation`]: シナリオの命令列を順に実行するエンジン
//! - [`logging`]: tracing によるログ初期化

pub mod logging;
pub mod models;
pub mod scenario;
pub mod simulation;
