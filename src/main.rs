use std::str::FromStr;

use clap::{Arg, ArgAction, Command};
use tracing::error;

use shipsim::logging::{self, LogConfig, LogOutput};
use shipsim::scenario::ScenarioConfig;
use shipsim::simulation::SimulationEngine;

fn main() {
    let matches = Command::new("shipsim")
        .version("0.1.0")
        .about("宇宙船オブジェクトモデル (Ship Command Simulation)")
        .long_about("名前付きプロパティを持つ宇宙船に対して、移動・回転・燃料コマンドを\n\
                     シナリオの順に実行します。")
        .arg(
            Arg::new("scenario")
                .short('s')
                .long("scenario")
                .value_name("FILE")
                .help("シナリオファイル(.yaml)のパスを指定")
                .long_help("実行するシナリオファイル(.yaml)のパスを指定します。\n\
                           指定しない場合、組み込みのデモシナリオを実行します。")
        )
        .arg(
            Arg::new("info")
                .short('i')
                .long("info")
                .action(ArgAction::SetTrue)
                .help("シナリオの情報のみ表示して終了")
        )
        .arg(
            Arg::new("stop-on-error")
                .long("stop-on-error")
                .action(ArgAction::SetTrue)
                .help("最初に失敗した命令で停止し、終了コード1で終了")
        )
        .arg(
            Arg::new("log-output")
                .long("log-output")
                .value_name("TARGET")
                .default_value("console")
                .help("ログ出力先 (console, file, both)")
        )
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .value_name("LEVEL")
                .help("ログレベル (trace, debug, info, warn, error)。-v より優先")
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::Count)
                .help("詳細出力レベル (-v: debug, -vv: trace)")
        )
        .get_matches();

    let output = match matches.get_one::<String>("log-output") {
        Some(value) => match LogOutput::from_str(value) {
            Ok(output) => output,
            Err(msg) => {
                eprintln!("エラー: {}", msg);
                std::process::exit(2);
            }
        },
        None => LogOutput::Console,
    };
    let level = match matches.get_one::<String>("log-level") {
        Some(value) => logging::parse_log_level(value),
        None => logging::level_from_verbosity(matches.get_count("verbose")),
    };
    let log_config = LogConfig {
        level,
        output,
        ..LogConfig::default()
    };
    let log_dir = log_config.log_dir.clone();

    let _guard = match logging::init_logging(log_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("ログ初期化エラー: {}", e);
            std::process::exit(1);
        }
    };
    if output.writes_file() {
        println!("ログファイル出力先: {}/", log_dir);
    }

    let scenario = match matches.get_one::<String>("scenario") {
        Some(path) => match ScenarioConfig::from_file(path) {
            Ok(scenario) => scenario,
            Err(e) => {
                error!("{}", e);
                eprintln!("エラー: {}", e);
                std::process::exit(1);
            }
        },
        None => ScenarioConfig::default_demo(),
    };

    if matches.get_flag("info") {
        scenario.print_summary();
        return;
    }

    let mut engine = SimulationEngine::new(scenario, matches.get_flag("stop-on-error"));
    match engine.run() {
        Ok(report) => {
            println!("最終状態: {}", engine.snapshot());
            println!("成功: {}件, 失敗: {}件", report.executed, report.failed);
        }
        Err(e) => {
            error!("シナリオを中断しました: {}", e);
            eprintln!("エラー: {}", e);
            std::process::exit(1);
        }
    }
}
