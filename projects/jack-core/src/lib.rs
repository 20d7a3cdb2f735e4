use jack_ast::{Node, Token};
use jack_parser::{tokenize, Parser};
use jack_types::{JackError, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub mod config;
pub mod units;

pub use config::{JackConfig, OutputConfig, CONFIG_FILE};
pub use units::{collect_units, OutputPaths, SOURCE_EXTENSION};

/// Tokens and tree of one source unit.
#[derive(Debug, Clone)]
pub struct CompiledUnit {
    pub tokens: Vec<Token>,
    pub tree: Node,
}

#[derive(Debug, Default)]
pub struct Compiler;

impl Compiler {
    pub fn new() -> Self {
        Self
    }

    /// Lexes the whole unit, then parses it in a single pass.
    pub fn compile_source(&self, source: &str) -> Result<CompiledUnit> {
        let tokens = tokenize(source)?;
        debug!(tokens = tokens.len(), "lexed unit");
        let tree = Parser::from_tokens(tokens.clone()).parse_class()?;
        Ok(CompiledUnit { tokens, tree })
    }

    pub fn compile_file(&self, path: &Path) -> Result<CompiledUnit> {
        debug!("compiling {}", path.display());
        self.compile_source(&read_unit(path)?)
    }

    /// Lexes a unit without parsing it, so units with grammar errors still
    /// yield their token listing.
    pub fn tokenize_file(&self, path: &Path) -> Result<Vec<Token>> {
        debug!("tokenizing {}", path.display());
        tokenize(&read_unit(path)?)
    }
}

fn read_unit(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| JackError::io(path, e.to_string()))
}

/// Compiles one unit and writes its artifacts. Returns the written paths.
pub fn process_unit(path: &Path, output: &OutputConfig) -> Result<Vec<PathBuf>> {
    let unit = Compiler::new().compile_file(path)?;
    let emitter = output.format.emitter();
    let paths = OutputPaths::for_unit(path, output.dir.as_deref(), output.format);

    if let Some(dir) = &output.dir {
        std::fs::create_dir_all(dir).map_err(|e| JackError::io(dir, e.to_string()))?;
    }

    let mut artifacts = vec![(paths.tree, emitter.emit_tree(&unit.tree)?)];
    if output.tokens {
        artifacts.push((paths.tokens, emitter.emit_tokens(&unit.tokens)?));
    }

    let mut written = Vec::with_capacity(artifacts.len());
    for (target, contents) in artifacts {
        std::fs::write(&target, contents).map_err(|e| JackError::io(&target, e.to_string()))?;
        info!("wrote {}", target.display());
        written.push(target);
    }
    Ok(written)
}

/// What to do with each unit of a batch.
#[derive(Debug, Clone)]
pub enum Action {
    /// Lex and parse only.
    Check,
    /// Lex, parse and write artifacts.
    Write(OutputConfig),
}

#[derive(Debug)]
pub struct UnitOutcome {
    pub source: PathBuf,
    /// Paths written for the unit; empty for [Action::Check].
    pub result: Result<Vec<PathBuf>>,
}

/// Outcomes of a batch, in the order the units were given.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub outcomes: Vec<UnitOutcome>,
}

impl BatchReport {
    pub fn num_ok(&self) -> usize {
        self.outcomes.iter().filter(|o| o.result.is_ok()).count()
    }

    pub fn num_failed(&self) -> usize {
        self.outcomes.len() - self.num_ok()
    }

    pub fn is_success(&self) -> bool {
        self.num_failed() == 0
    }

    pub fn failures(&self) -> impl Iterator<Item = (&Path, &JackError)> {
        self.outcomes.iter().filter_map(|o| o.result.as_ref().err().map(|e| (o.source.as_path(), e)))
    }

    pub fn summary(&self) -> String {
        format!("{} OK, {} failed", self.num_ok(), self.num_failed())
    }
}

/// Runs `action` on every unit. Units share no state, so each runs on its
/// own blocking worker; a failing unit does not stop the others.
pub async fn analyze(units: Vec<PathBuf>, action: Action) -> BatchReport {
    let handles: Vec<_> = units
        .into_iter()
        .map(|source| {
            let path = source.clone();
            let action = action.clone();
            let handle = tokio::task::spawn_blocking(move || match action {
                Action::Check => Compiler::new().compile_file(&path).map(|_| Vec::new()),
                Action::Write(output) => process_unit(&path, &output),
            });
            (source, handle)
        })
        .collect();

    let mut report = BatchReport::default();
    for (source, handle) in handles {
        let result = match handle.await {
            Ok(result) => result,
            Err(e) => Err(JackError::io(&source, format!("worker failed: {}", e))),
        };
        report.outcomes.push(UnitOutcome { source, result });
    }
    report
}
