use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use clap::{Args as ClapArgs, Parser, Subcommand};
use plant_diary::{
    ActionKind, AppConfig, CareError, CareStore, Clock, FileStore, HumidityLevel, LightLevel,
    Locale, NewCareAction, Plant, PlantDraft, PlantType, Preferences, SystemClock, View,
    WateringUrgency, action_label, catalog, days_until_watering, export_history_csv,
    health_label, model::parse_timestamp, relative_date, schedule::days_until_fertilizing,
    watering_label,
};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(name = "plant-diary")]
#[command(about = "Track houseplants, their watering schedule and care history")]
struct Args {
    /// Override the data directory from configuration
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List plants, optionally filtered by a search query
    List {
        #[arg(short, long)]
        query: Option<String>,
    },
    /// Show one plant in detail
    Show { id: u64 },
    /// Register a new plant
    Add {
        name: String,
        #[command(flatten)]
        fields: PlantFields,
    },
    /// Change a plant's fields
    Edit {
        id: u64,
        #[arg(long)]
        name: Option<String>,
        #[command(flatten)]
        fields: PlantFields,
    },
    /// Water a plant now
    Water { id: u64 },
    /// Delete a plant and its care history
    Delete { id: u64 },
    /// Record a care action (watering, fertilization, pruning, ...)
    Log {
        plant_id: u64,
        kind: ActionKind,
        #[arg(long)]
        quantity: Option<String>,
        #[arg(long)]
        notes: Option<String>,
        /// When it happened (RFC 3339 or YYYY-MM-DD); defaults to now
        #[arg(long)]
        at: Option<String>,
    },
    /// Remove a care action
    Unlog { action_id: u64 },
    /// Show care history, for one plant or all of them
    History { plant_id: Option<u64> },
    /// Dashboard statistics
    Stats,
    /// Upcoming waterings grouped into today, coming up and later
    Calendar {
        #[arg(long)]
        window: Option<i64>,
    },
    /// Browse the ailment catalog
    Ailments { query: Option<String> },
    /// Export care history to CSV
    Export {
        #[arg(short, long, default_value = ".")]
        output: PathBuf,
    },
    /// Add the sample plants
    Seed,
    /// Show or change preferences
    Prefs {
        #[arg(long)]
        language: Option<String>,
        #[arg(long)]
        dark_mode: Option<bool>,
        #[arg(long)]
        view: Option<String>,
    },
}

#[derive(ClapArgs, Debug, Default)]
struct PlantFields {
    #[arg(long = "type")]
    plant_type: Option<PlantType>,
    #[arg(long)]
    scientific_name: Option<String>,
    #[arg(long)]
    location: Option<String>,
    #[arg(long)]
    photo: Option<String>,
    #[arg(long)]
    notes: Option<String>,
    /// Days between waterings
    #[arg(long)]
    interval: Option<u32>,
    /// Days between fertilizations
    #[arg(long)]
    fertilize_every: Option<u32>,
    #[arg(long)]
    light: Option<LightLevel>,
    #[arg(long)]
    humidity: Option<HumidityLevel>,
    #[arg(long)]
    min_temp: Option<f64>,
    #[arg(long)]
    max_temp: Option<f64>,
    /// Acquisition date (YYYY-MM-DD)
    #[arg(long)]
    acquired: Option<NaiveDate>,
    /// Last watering (RFC 3339 or YYYY-MM-DD)
    #[arg(long)]
    watered: Option<String>,
}

impl PlantFields {
    fn apply(self, draft: &mut PlantDraft) -> Result<()> {
        if let Some(plant_type) = self.plant_type {
            draft.plant_type = plant_type;
        }
        if let Some(name) = self.scientific_name {
            draft.scientific_name = Some(name).filter(|s| !s.is_empty());
        }
        if let Some(location) = self.location {
            draft.location = Some(location).filter(|s| !s.is_empty());
        }
        if let Some(photo) = self.photo {
            draft.photo = Some(photo).filter(|s| !s.is_empty());
        }
        if let Some(notes) = self.notes {
            draft.notes = notes;
        }
        if let Some(interval) = self.interval {
            draft.watering_interval_days = interval;
        }
        if self.fertilize_every.is_some() {
            draft.fertilizing_interval_days = self.fertilize_every;
        }
        if self.light.is_some() {
            draft.light = self.light;
        }
        if self.humidity.is_some() {
            draft.humidity = self.humidity;
        }
        if self.min_temp.is_some() {
            draft.min_temperature_c = self.min_temp;
        }
        if self.max_temp.is_some() {
            draft.max_temperature_c = self.max_temp;
        }
        if self.acquired.is_some() {
            draft.acquired_on = self.acquired;
        }
        if let Some(watered) = self.watered {
            draft.last_watered = Some(
                parse_timestamp(&watered).with_context(|| format!("Invalid date `{watered}`"))?,
            );
        }
        Ok(())
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging (stderr, so command output stays clean)
    let filter = EnvFilter::builder()
        .with_default_directive(tracing::level_filters::LevelFilter::INFO.into())
        .parse_lossy("plant_diary=debug");

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let config = AppConfig::load().context("Failed to load configuration")?;
    let data_dir = args.data_dir.unwrap_or_else(|| config.storage.data_dir.clone());
    let backend = FileStore::open(&data_dir)
        .with_context(|| format!("Failed to open data directory {}", data_dir.display()))?;
    tracing::debug!("Using data directory {}", backend.dir().display());
    let clock = SystemClock;

    let mut care = CareStore::load(&backend, config.storage.keys(), &clock);
    if config.care.seed_sample_plants && care.plants().is_empty() {
        tracing::info!("Diary is empty, adding sample plants");
        care.seed_samples(&clock)?;
    }
    let mut prefs = Preferences::load(&backend, config.display.default_preferences());
    let locale = prefs.language;

    run(args.command, &mut care, &mut prefs, &config, &backend, &clock, locale)?;

    if care.is_dirty() && !care.save(&backend) {
        bail!("Failed to save diary to {}", data_dir.display());
    }
    Ok(())
}

fn run(
    command: Command,
    care: &mut CareStore,
    prefs: &mut Preferences,
    config: &AppConfig,
    backend: &FileStore,
    clock: &dyn Clock,
    locale: Locale,
) -> Result<()> {
    let now = clock.now_utc();

    match command {
        Command::List { query } => {
            let plants = care.search(query.as_deref().unwrap_or(""));
            if plants.is_empty() {
                println!("No plants found.");
            }
            for plant in plants {
                print_summary(plant, clock, locale);
            }
        }
        Command::Show { id } => {
            let plant = care.plant(id).ok_or(CareError::UnknownPlant(id))?;
            print_details(plant, clock, locale);
            if let Some(last) = care.history_for(id).first() {
                println!(
                    "  Last care:       {} {}",
                    action_label(last.kind, locale),
                    relative_date(last.timestamp, clock.now_utc(), locale)
                );
            }
            if let Some(watering) = care.history().latest(id, ActionKind::Watering) {
                println!(
                    "  Last logged watering: {}",
                    relative_date(watering.timestamp, clock.now_utc(), locale)
                );
            }
        }
        Command::Add { name, fields } => {
            let mut draft = PlantDraft::new(
                name,
                PlantType::Other,
                config.care.default_watering_interval_days,
            );
            fields.apply(&mut draft)?;
            let id = care.add_plant(draft, clock).map_err(CareError::from)?;
            println!("Added plant {id}");
        }
        Command::Edit { id, name, fields } => {
            let mut draft = care.plant(id).ok_or(CareError::UnknownPlant(id))?.to_draft();
            if let Some(name) = name {
                draft.name = name;
            }
            fields.apply(&mut draft)?;
            care.edit_plant(id, draft, clock).map_err(CareError::from)?;
            println!("Updated plant {id}");
        }
        Command::Water { id } => {
            if !care.water_plant(id, clock) {
                return Err(CareError::UnknownPlant(id).into());
            }
            println!("Watered plant {id}");
        }
        Command::Delete { id } => {
            let plant = care.delete_plant(id).ok_or(CareError::UnknownPlant(id))?;
            println!("Deleted {}", plant.name);
        }
        Command::Log {
            plant_id,
            kind,
            quantity,
            notes,
            at,
        } => {
            let timestamp = at
                .map(|raw| parse_timestamp(&raw).with_context(|| format!("Invalid date `{raw}`")))
                .transpose()?;
            let action = NewCareAction {
                plant_id,
                kind,
                timestamp,
                quantity,
                notes,
            };
            let id = care.record_action_checked(action, clock)?;
            println!("Recorded {} ({id})", action_label(kind, locale));
        }
        Command::Unlog { action_id } => {
            if !care.remove_action(action_id) {
                return Err(CareError::UnknownAction(action_id).into());
            }
            println!("Removed care action {action_id}");
        }
        Command::History { plant_id } => {
            let entries = match plant_id {
                Some(id) => care.history_for(id),
                None => {
                    let mut all: Vec<_> = care.history().entries().iter().collect();
                    all.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
                    all
                }
            };
            if entries.is_empty() {
                println!("No care actions recorded.");
            }
            for entry in entries {
                let plant_name = care.plant(entry.plant_id).map_or("?", |p| p.name.as_str());
                println!(
                    "{:>14}  {:<14} {:<20} {}{}",
                    entry.id,
                    action_label(entry.kind, locale),
                    plant_name,
                    relative_date(entry.timestamp, now, locale),
                    entry
                        .quantity
                        .as_deref()
                        .map(|q| format!(" ({q})"))
                        .unwrap_or_default(),
                );
            }
        }
        Command::Stats => {
            let stats = care.stats(now);
            println!("Plants:            {}", stats.total);
            println!("Need water today:  {}", stats.due_for_water);
            println!("Healthy:           {}", stats.healthy);
            println!("Need attention:    {}", stats.needing_attention);
            println!("Healthy share:     {}%", stats.percent_healthy);
        }
        Command::Calendar { window } => {
            let window = window.unwrap_or(config.care.calendar_window_days);
            let calendar = care.calendar(now, window);
            println!("Watering calendar from {}", clock.today());
            for (title, section) in [
                ("Today", &calendar.today),
                ("Coming up", &calendar.coming_up),
                ("Later", &calendar.later),
            ] {
                println!("{title}");
                if section.is_empty() {
                    println!("  -");
                }
                for entry in section {
                    println!(
                        "{} {:<20} {} ({})",
                        urgency_marker(entry.urgency()),
                        entry.plant.name,
                        watering_label(entry.days_remaining, locale),
                        entry.due_date
                    );
                }
            }
        }
        Command::Ailments { query } => {
            for ailment in catalog::search(query.as_deref().unwrap_or("")) {
                println!("{} [{}, {} severity]", ailment.name, ailment.kind, ailment.severity);
                println!("  {}", ailment.description);
                println!("  Symptoms:   {}", ailment.symptoms.join("; "));
                println!("  Treatment:  {}", ailment.treatment.join("; "));
                println!("  Prevention: {}", ailment.prevention.join("; "));
            }
        }
        Command::Export { output } => {
            let path = export_history_csv(care.history().entries(), care.plants(), &output, clock)?;
            println!("Exported to {}", path.display());
        }
        Command::Seed => {
            let ids = care.seed_samples(clock).map_err(CareError::from)?;
            println!("Added {} sample plants", ids.len());
        }
        Command::Prefs {
            language,
            dark_mode,
            view,
        } => {
            let changed = language.is_some() || dark_mode.is_some() || view.is_some();
            if let Some(language) = language {
                prefs.language = Locale::from_code(&language);
            }
            if let Some(dark_mode) = dark_mode {
                prefs.dark_mode = dark_mode;
            }
            if let Some(view) = view {
                prefs.last_view = Some(view.parse::<View>().map_err(anyhow::Error::msg)?);
            }
            if changed {
                prefs.save(backend).context("Failed to save preferences")?;
            }
            println!("language:  {}", prefs.language);
            println!("dark mode: {}", prefs.dark_mode);
            println!("view:      {}", prefs.last_view.unwrap_or_default());
        }
    }
    Ok(())
}

fn urgency_marker(urgency: WateringUrgency) -> &'static str {
    match urgency {
        WateringUrgency::Urgent => " !!",
        WateringUrgency::Tomorrow => "  !",
        WateringUrgency::Warning => "  ~",
        WateringUrgency::Normal => "   ",
    }
}

fn print_summary(plant: &Plant, clock: &dyn Clock, locale: Locale) {
    let days = days_until_watering(
        plant.last_watered,
        plant.watering_interval_days,
        clock.now_utc(),
    );
    println!(
        "{:>14}  {:<22} {:<14} {:<16} {}",
        plant.id,
        plant.name,
        plant.plant_type,
        health_label(plant.health, locale),
        watering_label(days, locale)
    );
}

fn print_details(plant: &Plant, clock: &dyn Clock, locale: Locale) {
    let now = clock.now_utc();
    let days = days_until_watering(plant.last_watered, plant.watering_interval_days, now);

    println!("{} ({})", plant.name, plant.id);
    if let Some(scientific) = &plant.scientific_name {
        println!("  Scientific name: {scientific}");
    }
    println!("  Type:            {}", plant.plant_type);
    if let Some(location) = &plant.location {
        println!("  Location:        {location}");
    }
    if let Some(acquired) = plant.acquired_on {
        println!("  Acquired:        {acquired}");
    }
    println!("  Health:          {}", health_label(plant.health, locale));
    println!("  Water every:     {} days", plant.watering_interval_days);
    match plant.last_watered {
        Some(last) => println!("  Last watered:    {}", relative_date(last, now, locale)),
        None => println!("  Last watered:    never"),
    }
    println!("  Next watering:   {}", watering_label(days, locale));
    if let Some(every) = plant.fertilizing_interval_days {
        println!("  Fertilize every: {every} days");
    }
    if let Some(days) = days_until_fertilizing(plant, now) {
        println!("  Next feeding in: {days} days");
    }
    if let Some(light) = plant.light {
        println!("  Light:           {light}");
    }
    if let Some(humidity) = plant.humidity {
        println!("  Humidity:        {humidity}");
    }
    if let (Some(min), Some(max)) = (plant.min_temperature_c, plant.max_temperature_c) {
        println!("  Temperature:     {min}-{max} °C");
    }
    if !plant.notes.is_empty() {
        println!("  Notes:           {}", plant.notes);
    }
}
