use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use hunter::config::{EngineConfig, CONFIG_FILE_NAME};
use hunter::daily::types::TrackSpec;
use hunter::engine::{install_timers, Command, CommandResult, Engine};
use hunter::notify::TracingSink;
use hunter::quests::logic::parse_target_count;
use hunter::quests::types::{ProgressInput, QuestKind, QuestSpec};
use hunter::scheduler::Scheduler;
use hunter::utils::persistence::hunter_dir;
use hunter::{build_info, Catalog, JsonFileStore, Reward, SystemClock};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "hunter")]
#[command(about = "Hunter - level up by finishing quests, beating bosses and keeping daily streaks")]
#[command(version)]
struct Cli {
    /// Data directory (defaults to ~/.hunter)
    #[arg(short, long, global = true)]
    data_dir: Option<PathBuf>,

    /// Hunter to act as
    #[arg(short, long, global = true, default_value = "hunter")]
    player: String,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the hunter profile
    Init,

    /// Show level, rank, gold and streak
    Status,

    /// Manage quests
    #[command(subcommand)]
    Quest(QuestCommand),

    /// Challenge bosses
    #[command(subcommand)]
    Boss(BossCommand),

    /// Daily reset and goal tracks
    #[command(subcommand)]
    Daily(DailyCommand),

    /// Evaluate achievements now
    Achievements {
        /// Only show progress toward each next rank
        #[arg(long)]
        progress: bool,
    },

    /// Check for a rank advancement and show progress to the next rank
    Rank,

    /// Take experience away from the hunter
    Penalty {
        amount: u64,
    },

    /// Choose the displayed title (omit to clear)
    Title {
        title: Option<String>,
    },

    /// Run a raw JSON command, e.g. '{"command":"list_quests"}'
    Exec {
        json: String,
    },

    /// Keep running, checking daily resets and boss timeouts on a timer
    Watch,

    /// Print version and build information
    Version,
}

#[derive(Subcommand)]
enum QuestCommand {
    /// Add a quest
    Add(QuestArgs),
    /// List quests, oldest first
    List,
    /// Add progress: a number, or "complete"
    Progress { quest_id: String, progress: ProgressInput },
    /// Complete a quest outright
    Complete { quest_id: String },
    /// Delete a quest without reward
    Delete { quest_id: String },
}

#[derive(Args)]
struct QuestArgs {
    #[arg(short, long)]
    title: Option<String>,
    /// Target count (invalid values fall back to 5)
    #[arg(long)]
    target: Option<String>,
    /// Unit label, e.g. "pushups"
    #[arg(short, long)]
    metric: Option<String>,
    #[arg(long)]
    description: Option<String>,
    /// Make it a daily quest
    #[arg(long)]
    daily: bool,
}

#[derive(Subcommand)]
enum BossCommand {
    /// Show the boss catalog and running battles
    List,
    /// Start a battle
    Start { boss_id: String },
    /// Add progress to a battle
    Hit {
        boss_id: String,
        #[arg(default_value_t = 1)]
        amount: u32,
    },
    /// Time out every expired battle
    Check,
}

#[derive(Subcommand)]
enum DailyCommand {
    /// Run the daily reset if the day has changed
    Check,
    /// Add a daily goal track
    TrackAdd(TrackArgs),
    /// Log today's progress on a track
    Log { track_id: String, amount: u32 },
}

#[derive(Args)]
struct TrackArgs {
    id: String,
    name: String,
    #[arg(long)]
    target: u32,
    #[arg(long)]
    unit: Option<String>,
    #[arg(long, default_value_t = 0)]
    reward_exp: i64,
    #[arg(long, default_value_t = 0)]
    reward_gold: i64,
    #[arg(long, default_value_t = 0)]
    penalty_exp: i64,
    #[arg(long, default_value_t = 0)]
    penalty_gold: i64,
}

fn to_command(command: Commands) -> Result<Option<Command>> {
    let command = match command {
        Commands::Init => Command::CreatePlayer,
        Commands::Status => Command::Profile,
        Commands::Quest(QuestCommand::Add(args)) => Command::CreateQuest {
            spec: QuestSpec {
                title: args.title,
                description: args.description,
                metric: args.metric,
                target_count: args.target.as_deref().and_then(parse_target_count),
                kind: if args.daily {
                    QuestKind::Daily
                } else {
                    QuestKind::Normal
                },
            },
        },
        Commands::Quest(QuestCommand::List) => Command::ListQuests,
        Commands::Quest(QuestCommand::Progress { quest_id, progress }) => {
            Command::UpdateQuestProgress { quest_id, progress }
        }
        Commands::Quest(QuestCommand::Complete { quest_id }) => Command::CompleteQuest { quest_id },
        Commands::Quest(QuestCommand::Delete { quest_id }) => Command::DeleteQuest { quest_id },
        Commands::Boss(BossCommand::List) => Command::ListBattles,
        Commands::Boss(BossCommand::Start { boss_id }) => Command::StartBossBattle { boss_id },
        Commands::Boss(BossCommand::Hit { boss_id, amount }) => {
            Command::AdvanceBossBattle { boss_id, amount }
        }
        Commands::Boss(BossCommand::Check) => Command::CheckBossTimeouts,
        Commands::Daily(DailyCommand::Check) => Command::CheckDailyReset,
        Commands::Daily(DailyCommand::TrackAdd(args)) => Command::AddDailyTrack {
            track: TrackSpec {
                id: args.id,
                name: args.name,
                unit: args.unit,
                target: args.target,
                reward: Reward::new(args.reward_exp, args.reward_gold),
                penalty: Reward::new(args.penalty_exp, args.penalty_gold),
            },
        },
        Commands::Daily(DailyCommand::Log { track_id, amount }) => {
            Command::LogDailyTrack { track_id, amount }
        }
        Commands::Achievements { progress: false } => Command::CheckAchievements,
        Commands::Achievements { progress: true } => Command::AchievementProgress,
        Commands::Rank => Command::CheckRankProgress,
        Commands::Penalty { amount } => Command::ApplyPenalty { amount },
        Commands::Title { title } => Command::SetActiveTitle { title },
        Commands::Exec { json } => {
            serde_json::from_str(&json).context("Not a valid hunter command")?
        }
        Commands::Watch | Commands::Version => return Ok(None),
    };
    Ok(Some(command))
}

fn print_catalog(catalog: &Catalog) {
    println!("Bosses:");
    for boss in catalog.bosses {
        println!(
            "  {:<16} {} - {} {} in {}h",
            boss.id,
            boss.name,
            boss.base_target_count,
            boss.metric,
            boss.time_limit_secs / 3600
        );
    }
}

fn print_result(result: &CommandResult) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(result)?);
    Ok(())
}

async fn watch(engine: Arc<Engine<JsonFileStore>>, player_id: &str) -> Result<()> {
    let mut scheduler = Scheduler::new();
    install_timers(&mut scheduler, engine, player_id);
    tracing::info!("Watching {} (Ctrl+C to stop)", player_id);

    tokio::signal::ctrl_c().await?;
    scheduler.stop_all();
    tracing::info!("Stopped");
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .init();

    let data_dir = match cli.data_dir {
        Some(dir) => dir,
        None => hunter_dir()?,
    };
    let config = EngineConfig::load_or_default(&data_dir.join(CONFIG_FILE_NAME));
    let store = Arc::new(JsonFileStore::new(data_dir.join("players")));
    tracing::debug!("Player data in {}", store.dir().display());
    let engine = Arc::new(Engine::new(
        store,
        Arc::new(SystemClock),
        Arc::new(TracingSink),
        Catalog::builtin(),
        config,
    )?);

    let show_catalog = matches!(cli.command, Commands::Boss(BossCommand::List));
    let is_watch = matches!(cli.command, Commands::Watch);
    let Some(command) = to_command(cli.command)? else {
        if is_watch {
            return watch(engine, &cli.player).await;
        }
        println!("{}", build_info::describe());
        return Ok(());
    };

    if show_catalog {
        print_catalog(engine.catalog());
    }
    let result = engine.execute(&cli.player, command).await;
    print_result(&result)?;
    if !result.success {
        std::process::exit(1);
    }
    Ok(())
}
