use crate::config::ImportConfig;
use crate::report::ErrorReporter;
use crate::response::decode;
use crate::token::Token;
use crate::{ConquestError, Result};

use conquest_core::prelude::*;
use reqwest::multipart::{Form, Part};
use std::path::{Path, PathBuf};
use tokio::time::{Instant, sleep};
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Submits files as import batches and reports how validation went.
///
/// ```no_run
/// # use conquest_client::{Import, ImportConfig, Token};
/// # use conquest_core::prelude::ImportType;
/// # async fn run(token: Token) -> conquest_client::Result<()> {
/// let import = Import::with_config(token, ImportConfig::default().with_output_dir("./errors"));
/// let result = import.add("assets.csv", ImportType::Asset).await?;
/// if !result.success {
///     eprintln!("{:?}, see {:?}", result.error_msg, result.error_file);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Import {
    token: Token,
    config: ImportConfig,
}

impl Import {
    pub fn new(token: Token) -> Self {
        Self::with_config(token, ImportConfig::default())
    }

    pub fn with_config(token: Token, config: ImportConfig) -> Self {
        Self { token, config }
    }

    pub fn config(&self) -> &ImportConfig {
        &self.config
    }

    /// Changes where error CSVs go. Applies to subsequent calls only.
    pub fn set_output_dir(&mut self, dir: impl Into<PathBuf>) {
        self.config.output_dir = dir.into();
    }

    /// Uploads `filename` as a batch of `import_type` and waits for it to be processed.
    ///
    /// Rows failing validation do not make this fail: the result has `success == false`,
    /// the server's message in `error_msg` and, when the server offers one, the path
    /// of the written error CSV in `error_file`.
    pub async fn add(
        &self,
        filename: impl AsRef<Path>,
        import_type: ImportType,
    ) -> Result<ImportResult> {
        let source = filename.as_ref();
        let batch = self.submit(source, import_type).await?;
        let state = self.wait(&batch).await?;

        if state.status == BatchStatus::Completed {
            info!(%batch, %import_type, source = %source.display(), "Import completed");
            return Ok(ImportResult::completed(batch));
        }

        let mut failed_rows = None;
        let error_file = if state.offers_error_csv() {
            let payload = self.error_csv(&batch).await?;
            failed_rows = ErrorReport::parse(&payload).ok().map(|r| r.row_count());
            let reporter = ErrorReporter::new(&self.config.output_dir);
            Some(reporter.write(&payload, source, &batch).await?)
        } else {
            None
        };

        warn!(
            %batch,
            %import_type,
            error = state.error.as_deref().unwrap_or_default(),
            failed_rows = ?failed_rows,
            error_file = ?error_file,
            "Import failed validation"
        );

        Ok(ImportResult::failed(batch, state.error, error_file))
    }

    /// Like [`add`](Self::add), with the import type given by name (e.g. `"Asset"`).
    pub async fn add_named(
        &self,
        filename: impl AsRef<Path>,
        import_type: &str,
    ) -> Result<ImportResult> {
        let import_type: ImportType = import_type.parse()?;
        self.add(filename, import_type).await
    }

    /// Uploads the file and returns the id of the new batch without waiting for it.
    pub async fn submit(&self, source: &Path, import_type: ImportType) -> Result<Uuid> {
        let data = match tokio::fs::read(source).await {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(ConquestError::FileNotFound(source.to_path_buf()));
            }
            Err(e) => return Err(e.into()),
        };

        let file_name = source
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "import.csv".to_string());
        let mime = mime_guess::from_path(source).first_or_octet_stream();

        let part = Part::bytes(data)
            .file_name(file_name)
            .mime_str(mime.as_ref())?;
        let form = Form::new().part(IMPORT_FILE_FIELD, part);

        let builder = self
            .token
            .http()
            .post(self.token.url(&import_type.add_path()))
            .multipart(form);

        let body = self.token.send(builder).await?.into_body()?;
        let batch: Uuid = decode(&body, "import batch id")?;

        debug!(%batch, %import_type, source = %source.display(), "Submitted import batch");
        Ok(batch)
    }

    pub async fn state(&self, batch: &Uuid) -> Result<BatchState> {
        let builder = self.token.http().get(self.token.url(&batch_state_path(batch)));
        let body = self.token.send(builder).await?.into_body()?;
        decode(&body, "batch state")
    }

    /// Polls the batch until it is no longer processing.
    pub async fn wait(&self, batch: &Uuid) -> Result<BatchState> {
        let started = Instant::now();

        loop {
            let state = self.state(batch).await?;
            if state.status != BatchStatus::Processing {
                return Ok(state);
            }

            let waited = started.elapsed();
            if self.config.poll_timeout.is_some_and(|limit| waited >= limit) {
                return Err(ConquestError::ImportTimeout {
                    batch: *batch,
                    waited,
                });
            }

            debug!(%batch, "Batch still processing");
            sleep(self.config.poll_interval).await;
        }
    }

    /// Fetches the error CSV the server produced for a failed batch, as sent.
    pub async fn error_csv(&self, batch: &Uuid) -> Result<String> {
        let builder = self
            .token
            .http()
            .get(self.token.url(&batch_error_csv_path(batch)));
        self.token.send(builder).await?.into_body()
    }

    /// Fetches and parses the error CSV of a failed batch.
    ///
    /// Fails with [`ConquestError::Report`] when the payload is not well-formed CSV;
    /// use [`error_csv`](Self::error_csv) for the raw text.
    pub async fn error_report(&self, batch: &Uuid) -> Result<ErrorReport> {
        let payload = self.error_csv(batch).await?;
        Ok(ErrorReport::parse(&payload)?)
    }
}
