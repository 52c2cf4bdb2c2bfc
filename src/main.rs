use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use leverage_planner::config::{parse_tp_list, PlannerConfig};
use leverage_planner::{
    calculate_trade, Direction, LimitStyle, SizingConfig, SizingMethod, TradeParameters,
    TradeResult,
};

/// Leveraged trade planner: entries, stop, liquidation and take-profits.
#[derive(Parser)]
#[command(name = "leverage-planner")]
#[command(about = "Compute a leveraged trade plan", long_about = None)]
struct Cli {
    /// Account deposit in USD
    #[arg(long)]
    deposit: f64,

    /// long or short
    #[arg(short, long)]
    direction: String,

    /// Current market price
    #[arg(short, long)]
    price: f64,

    /// Leverage multiplier
    #[arg(short, long)]
    leverage: f64,

    /// Number of staggered limit entries (0-3)
    #[arg(long)]
    limits: Option<u8>,

    /// aggressive|increasing, equal, moderate|decreasing
    #[arg(long)]
    style: Option<String>,

    /// Fraction of deposit used as margin by fixed sizing
    #[arg(long, conflicts_with = "leverage_risk")]
    deposit_risk: Option<f64>,

    /// Risk 1/leverage of the deposit
    #[arg(long)]
    leverage_risk: bool,

    /// Adverse move defining the stop (fraction)
    #[arg(long)]
    stop_risk: Option<f64>,

    /// Take-profit moves, comma separated (e.g. 0.07,0.15,0.25)
    #[arg(long)]
    tp: Option<String>,

    /// fixed, kelly, fixed_fractional, volatility, risk_parity
    #[arg(long, default_value = "fixed")]
    sizing: String,

    #[arg(long)]
    win_rate: Option<f64>,

    #[arg(long)]
    win_loss_ratio: Option<f64>,

    #[arg(long)]
    fixed_fraction: Option<f64>,

    #[arg(long)]
    atr: Option<f64>,

    #[arg(long, default_value = "2.0")]
    atr_multiplier: f64,

    #[arg(long)]
    target_risk: Option<f64>,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let cfg = PlannerConfig::from_env().context("loading PLANNER_* configuration")?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&cfg.log_level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .with_writer(std::io::stderr)
        .init();

    let params = build_params(&cli, &cfg)?;
    let result = calculate_trade(&params).context("computing trade plan")?;

    if cli.json {
        println!("{}", result.to_json_pretty()?);
    } else {
        print_report(&result);
    }

    Ok(())
}

fn build_params(cli: &Cli, cfg: &PlannerConfig) -> Result<TradeParameters> {
    let direction: Direction = cli.direction.parse()?;
    let mut params = cfg.apply(TradeParameters::new(
        cli.deposit,
        direction,
        cli.price,
        cli.leverage,
    ));

    if let Some(n) = cli.limits {
        params = params.with_num_limits(n);
    }
    if let Some(style) = &cli.style {
        params = params.with_limit_style(style.parse::<LimitStyle>()?);
    }
    if cli.leverage_risk {
        params = params.with_leverage_risk();
    } else if let Some(risk) = cli.deposit_risk {
        params = params.with_deposit_risk(risk);
    }
    if let Some(risk) = cli.stop_risk {
        params = params.with_stop_risk(risk);
    }
    if let Some(tp) = &cli.tp {
        let tps = parse_tp_list(tp).map_err(anyhow::Error::msg).context("--tp")?;
        params = params.with_tp_percents(tps);
    }

    Ok(params.with_sizing(sizing_from_cli(cli)?))
}

fn sizing_from_cli(cli: &Cli) -> Result<SizingConfig> {
    let method: SizingMethod = cli.sizing.parse()?;
    let sizing = match method {
        SizingMethod::Fixed => SizingConfig::Fixed,
        SizingMethod::Kelly => SizingConfig::Kelly {
            win_rate: cli.win_rate.context("--win-rate is required for kelly")?,
            avg_win_loss_ratio: cli
                .win_loss_ratio
                .context("--win-loss-ratio is required for kelly")?,
        },
        SizingMethod::FixedFractional => SizingConfig::FixedFractional {
            fixed_fraction: cli
                .fixed_fraction
                .context("--fixed-fraction is required for fixed_fractional")?,
        },
        SizingMethod::Volatility => SizingConfig::Volatility {
            atr_value: cli.atr.unwrap_or(0.0),
            atr_multiplier: cli.atr_multiplier,
        },
        SizingMethod::RiskParity => SizingConfig::RiskParity {
            target_risk_pct: cli
                .target_risk
                .context("--target-risk is required for risk_parity")?,
        },
    };
    Ok(sizing)
}

fn print_report(r: &TradeResult) {
    println!("Trade plan ({} x{})", r.direction, r.leverage);
    println!("  Sizing:       {} | {}", r.position_sizing_method, r.position_sizing_note);
    println!("  Margin:       ${}", r.margin);
    println!("  Position:     ${}", r.position);
    println!("  Entry:        {}", r.entry_price);
    println!();
    println!("Limits:");
    for (i, l) in r.limits.iter().enumerate() {
        println!(
            "  #{}  {}  margin ${} ({}%)",
            i + 1,
            l.price,
            l.margin,
            l.split_pct
        );
    }
    println!();
    println!("Risk:");
    println!("  Stop:         {} (risk ${})", r.stop_price, r.stop_usd);
    println!(
        "  Liquidation:  {} ({}% from entry)",
        r.liquidation_price, r.liquidation_distance_pct
    );
    println!(
        "  Safety:       {}% [{}]",
        r.safety_margin_pct, r.safety_level
    );
    println!();
    println!("Take profits:");
    for t in &r.takes {
        println!(
            "  TP{}  {}  +{}%  ${}  R:R {}",
            t.level, t.price, t.move_pct, t.usd, t.risk_reward
        );
    }
}
