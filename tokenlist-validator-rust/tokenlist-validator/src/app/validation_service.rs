use futures::stream::{self, StreamExt, TryStreamExt};
use std::sync::Arc;
use tracing::{debug, info};

use tokenlist_core::{ChainId, Diagnostic, DiagnosticReport};

use super::generator::{ListGenerator, TokenListGenerator};
use crate::domain::error::ValidatorError;
use crate::infrastructure::blockchain::ChainRegistry;
use crate::infrastructure::config::ValidatorConfig;
use crate::infrastructure::external_list::{ExternalListSource, HttpExternalListSource};
use crate::infrastructure::logger::Logger;
use crate::infrastructure::storage::DataDir;
use crate::validators::{Aggregator, EntryLoader, ExternalListChecker, LoadedEntry, Reconciler};

#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Only validate these entries. The compiled list is still checked as a whole.
    pub tokens: Option<Vec<String>>,
    /// Load and aggregate only; no chain reads and no external list.
    pub skip_chain_checks: bool,
}

pub struct ValidationService {
    datadir: DataDir,
    privileged_chain: ChainId,
    concurrency: usize,
    loader: EntryLoader,
    aggregator: Aggregator,
    registry: Arc<ChainRegistry>,
    external_source: Arc<dyn ExternalListSource>,
    generator: Arc<dyn ListGenerator>,
}

impl ValidationService {
    pub fn new(config: &ValidatorConfig) -> Result<Self, ValidatorError> {
        let registry = ChainRegistry::new(config)?;
        info!("🔗 Chain registry ready with {} chains", registry.len());

        let external_source = HttpExternalListSource::new(
            config.external_list_url.clone(),
            config.privileged_chain.chain_id(),
            config.rpc_timeout(),
        );

        Self::with_collaborators(
            DataDir::new(config.datadir.clone()),
            config.privileged_chain,
            config.concurrency,
            Arc::new(registry),
            Arc::new(external_source),
            Arc::new(TokenListGenerator::new()),
        )
    }

    pub fn with_collaborators(
        datadir: DataDir,
        privileged_chain: ChainId,
        concurrency: usize,
        registry: Arc<ChainRegistry>,
        external_source: Arc<dyn ExternalListSource>,
        generator: Arc<dyn ListGenerator>,
    ) -> Result<Self, ValidatorError> {
        Ok(Self {
            datadir,
            privileged_chain,
            concurrency: concurrency.max(1),
            loader: EntryLoader::new()?,
            aggregator: Aggregator::new()?,
            registry,
            external_source,
            generator,
        })
    }

    /// One complete run. Only a run-fatal problem (unreadable data directory,
    /// chain missing from the registry) is returned as `Err`.
    pub async fn run(&self, options: &RunOptions) -> Result<DiagnosticReport, ValidatorError> {
        let (folders, selection_diagnostics) = self.select_folders(options)?;
        info!("🔍 Validating {} entries in {}", folders.len(), self.datadir.root().display());

        let loaded: Vec<(String, Result<LoadedEntry, Vec<Diagnostic>>)> = folders
            .into_iter()
            .map(|key| {
                let result = self.loader.load_from(&self.datadir, &key);
                (key, result)
            })
            .collect();

        let mut report = DiagnosticReport::new();

        let per_entry: Vec<(String, Vec<Diagnostic>)> = if options.skip_chain_checks {
            info!("⏭️  Chain checks skipped");
            loaded
                .into_iter()
                .map(|(key, result)| (key, result.err().unwrap_or_default()))
                .collect()
        } else {
            let (checker, unavailable) =
                ExternalListChecker::fetch(self.external_source.as_ref(), self.privileged_chain).await;
            report.extend(unavailable);
            self.reconcile_all(loaded, Arc::new(checker)).await?
        };

        report.extend(selection_diagnostics);
        let entry_count = per_entry.len();
        for (key, diagnostics) in per_entry {
            Logger::entry_checked(
                &key,
                diagnostics.iter().filter(|d| d.is_error()).count(),
                diagnostics.iter().filter(|d| d.is_warning()).count(),
            );
            report.extend(diagnostics);
        }

        report.extend(self.aggregator.validate(self.generator.as_ref(), self.datadir.root()));

        Logger::run_finished(entry_count, report.error_count(), report.warning_count());
        Ok(report)
    }

    /// Reconciles loaded entries with bounded concurrency; output keeps
    /// folder order whatever order the checks finish in.
    async fn reconcile_all(
        &self,
        loaded: Vec<(String, Result<LoadedEntry, Vec<Diagnostic>>)>,
        checker: Arc<ExternalListChecker>,
    ) -> Result<Vec<(String, Vec<Diagnostic>)>, ValidatorError> {
        let reconciler = Reconciler::new(Arc::clone(&self.registry), checker);
        let reconciler = &reconciler;

        stream::iter(loaded)
            .map(|(key, result)| async move {
                match result {
                    Ok(entry) => reconciler.reconcile(&entry).await.map(|d| (key, d)),
                    Err(load_diagnostics) => Ok((key, load_diagnostics)),
                }
            })
            .buffered(self.concurrency)
            .try_collect()
            .await
    }

    /// Folders to validate, plus an error for each requested name that has
    /// no folder.
    fn select_folders(&self, options: &RunOptions) -> Result<(Vec<String>, Vec<Diagnostic>), ValidatorError> {
        let folders = self.datadir.folders()?;
        let Some(requested) = &options.tokens else {
            return Ok((folders, Vec::new()));
        };

        let missing = requested
            .iter()
            .filter(|name| !folders.contains(name))
            .map(|name| Diagnostic::error(format!("{}: no such entry in {}", name, self.datadir.root().display())))
            .collect();
        let selected = folders.into_iter().filter(|folder| requested.contains(folder)).collect();
        debug!("Selected entries: {:?}", requested);

        Ok((selected, missing))
    }
}
