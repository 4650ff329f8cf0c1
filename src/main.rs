use clap::{Parser, Subcommand};
use hvac_toolbox::app::{self, AppError};
use hvac_toolbox::i18n::{self, Translator};
use hvac_toolbox::ui_cli::Console;
use hvac_toolbox::{
    config, convert_unit, estimate_gas_charge, estimate_pressure_drop, report, ConversionInput,
    GasChargeInput, PressureDropInput,
};
use tracing::debug;

#[derive(Parser)]
#[command(name = "hvac_toolbox")]
#[command(about = "HVAC/refrigeration technician calculator", long_about = None)]
struct Cli {
    /// 표시 언어 (auto/ko/en/pt)
    #[arg(short = 'L', long, default_value = "auto", global = true)]
    lang: String,
    /// 결과를 JSON으로 출력
    #[arg(long, global = true)]
    json: bool,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// 대화형 메뉴 (기본값)
    Interactive,
    /// 냉매 충전량 추정
    GasCharge {
        /// 정격 용량 [BTU]
        #[arg(long, allow_hyphen_values = true)]
        capacity: String,
        /// 배관 길이 [m]
        #[arg(long, allow_hyphen_values = true)]
        length: String,
        /// 냉매 종류 (R410A/R22/R32). 생략 시 설정값 사용
        #[arg(long)]
        refrigerant: Option<String>,
    },
    /// 배관 압력손실 추정
    PressureDrop {
        /// 배관 내경 [mm]
        #[arg(long, allow_hyphen_values = true)]
        diameter: String,
        /// 배관 길이 [m]
        #[arg(long, allow_hyphen_values = true)]
        length: String,
        /// 체적 유량 [m3/h]
        #[arg(long, allow_hyphen_values = true)]
        flow: String,
    },
    /// 단위 변환
    Convert {
        /// 변환할 값
        #[arg(allow_hyphen_values = true)]
        value: String,
        /// psi-bar, bar-psi, btu-watts, watts-btu, celsius-fahrenheit, fahrenheit-celsius
        #[arg(long)]
        kind: Option<String>,
    },
}

/// 프로그램의 엔트리 포인트. 설정을 로드한 뒤 요청된 계산 또는 대화형 메뉴를 실행한다.
fn main() {
    let cli = Cli::parse();
    let mut cfg = match config::load_or_default() {
        Ok(cfg) => cfg,
        Err(err) => {
            let tr = Translator::new(&i18n::resolve_language(&cli.lang, None));
            eprintln!("{}", report::config_error_message(&tr, &err));
            std::process::exit(1);
        }
    };
    hvac_toolbox::init_tracing(&cfg.log_filter);
    let mut tr = app::translator_for(&cfg, &cli.lang);

    if let Err(err) = run_command(cli, &mut cfg, &mut tr) {
        debug!(%err, "command failed");
        eprintln!("{}", report::app_error_message(&tr, &err));
        std::process::exit(1);
    }
}

fn run_command(
    cli: Cli,
    cfg: &mut config::Config,
    tr: &mut Translator,
) -> Result<(), AppError> {
    let lines = match cli.command.unwrap_or(Commands::Interactive) {
        Commands::Interactive => {
            let mut console = Console::stdio();
            return app::run(&mut console, cfg, tr, true);
        }
        Commands::GasCharge {
            capacity,
            length,
            refrigerant,
        } => {
            let refrigerant =
                refrigerant.unwrap_or_else(|| cfg.default_refrigerant.label().to_string());
            let input = GasChargeInput::parse(&capacity, &length, &refrigerant)?;
            let res = estimate_gas_charge(&input)?;
            if cli.json {
                vec![serde_json::to_string_pretty(&res)?]
            } else {
                report::gas_charge_lines(tr, &res)
            }
        }
        Commands::PressureDrop {
            diameter,
            length,
            flow,
        } => {
            let input = PressureDropInput::parse(&diameter, &length, &flow)?;
            let res = estimate_pressure_drop(&input)?;
            if cli.json {
                vec![serde_json::to_string_pretty(&res)?]
            } else {
                report::pressure_drop_lines(tr, &res)
            }
        }
        Commands::Convert { value, kind } => {
            let kind = kind.unwrap_or_else(|| cfg.default_conversion.selector().to_string());
            let input = ConversionInput::parse(&value, &kind)?;
            let res = convert_unit(&input)?;
            if cli.json {
                vec![serde_json::to_string_pretty(&res)?]
            } else {
                vec![report::conversion_line(&res)]
            }
        }
    };
    for line in lines {
        println!("{line}");
    }
    Ok(())
}
