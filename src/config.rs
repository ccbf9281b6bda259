use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::Path;
use log::error;

pub const DEFAULT_CAPACITY: usize = 16;

#[derive(Debug, Deserialize, Default, Clone)]
pub struct Config {
    #[serde(default)]
    pub capacity: Option<usize>,
    #[serde(default)]
    pub step: Vec<StepConfig>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StepConfig {
    pub op: String,
    #[serde(default)]
    pub fill: Option<String>,
    #[serde(default)]
    pub count: Option<usize>,
    #[serde(default)]
    pub data: Option<String>,
    #[serde(default)]
    pub capacity: Option<usize>,
}

/// A single buffer operation in a demo session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Push(Vec<u8>),
    Pull(usize),
    Clear,
    Resize(usize),
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Push(data) => write!(f, "push {} bytes", data.len()),
            Step::Pull(n) => write!(f, "pull {} bytes", n),
            Step::Clear => write!(f, "clear"),
            Step::Resize(capacity) => write!(f, "resize to {}", capacity),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub capacity: usize,
    pub steps: Vec<Step>,
}

impl Default for Session {
    /// Fill, partially drain, wrap around, then grow.
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            steps: vec![
                Step::Push(vec![b'0'; 15]),
                Step::Pull(10),
                Step::Push(vec![b'1'; 4]),
                Step::Resize(32),
            ],
        }
    }
}

pub fn load_config(path: &str) -> Result<Session, Box<dyn std::error::Error>> {

    if !Path::new(path).exists() {
        return Err(format!("Config file not found: {}", path).into());
    }

    let content = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config file {}: {}", path, e))?;

    let session = parse_config(&content)
        .map_err(|e| format!("Failed to parse TOML config {}: {}", path, e))?;

    log::info!("Config loaded from: {}", path);
    Ok(session)
}

pub fn parse_config(content: &str) -> Result<Session, toml::de::Error> {
    let cfg: Config = toml::from_str(content)?;

    log::info!("Found {} steps in config", cfg.step.len());

    let capacity = cfg.capacity.unwrap_or(DEFAULT_CAPACITY);
    let mut steps = Vec::with_capacity(cfg.step.len());
    for (i, s) in cfg.step.into_iter().enumerate() {
        match build_step(&s) {
            Ok(step) => steps.push(step),
            Err(reason) => error!("Skipping step {} ('{}'): {}", i, s.op, reason),
        }
    }

    if steps.is_empty() {
        log::warn!("No valid steps in config - the session will only show the empty buffer");
    }

    Ok(Session { capacity, steps })
}

fn build_step(s: &StepConfig) -> Result<Step, String> {
    if s.op.eq_ignore_ascii_case("push") {
        if let Some(data) = &s.data {
            return Ok(Step::Push(data.as_bytes().to_vec()));
        }
        let fill = s.fill.as_deref().ok_or("push needs `fill` or `data`")?;
        let byte = match fill.as_bytes() {
            [b] => *b,
            _ => return Err(format!("`fill` must be a single byte, got {:?}", fill)),
        };
        let count = s.count.ok_or("push with `fill` needs `count`")?;
        Ok(Step::Push(vec![byte; count]))
    } else if s.op.eq_ignore_ascii_case("pull") {
        let count = s.count.ok_or("pull needs `count`")?;
        Ok(Step::Pull(count))
    } else if s.op.eq_ignore_ascii_case("clear") {
        Ok(Step::Clear)
    } else if s.op.eq_ignore_ascii_case("resize") {
        let capacity = s.capacity.ok_or("resize needs `capacity`")?;
        Ok(Step::Resize(capacity))
    } else {
        Err(format!("unknown op '{}'. Use push, pull, clear or resize", s.op))
    }
}
