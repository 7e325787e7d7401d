use crate::error::MockError;
use crate::fixtures::Fixtures;

use conquest_core::prelude::*;
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};
use uuid::Uuid;

#[derive(Clone, Debug)]
pub struct MockConfig {
    pub username: String,
    pub password: String,
    /// The only connection name the server accepts.
    pub connection: String,
    /// Lifetime of issued access tokens.
    pub token_ttl: Duration,
    /// Values accepted in the `TypeID` column of an import file.
    pub valid_type_ids: Vec<i64>,
    /// Number of state polls a new batch answers with `Processing`.
    pub processing_polls: u32,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            username: "conquest".to_string(),
            password: "conquest".to_string(),
            connection: "Test".to_string(),
            token_ttl: Duration::from_secs(3600),
            valid_type_ids: vec![12, 31, 40],
            processing_polls: 1,
        }
    }
}

/// Request counters, useful to assert on in tests.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Stats {
    pub password_grants: u32,
    pub refresh_grants: u32,
    pub state_polls: u32,
}

struct Issued {
    username: String,
    expires_at: Instant,
}

struct Batch {
    polls_left: u32,
    error: Option<String>,
    report: Option<String>,
}

struct Inner {
    assets: BTreeMap<i64, Map<String, Value>>,
    actions: BTreeMap<i64, Map<String, Value>>,
    access_tokens: HashMap<String, Issued>,
    refresh_tokens: HashMap<String, String>,
    batches: HashMap<Uuid, Batch>,
    stats: Stats,
}

/// Shared state of the fixture server.
#[derive(Clone)]
pub struct MockState {
    config: Arc<MockConfig>,
    inner: Arc<Mutex<Inner>>,
}

/// A resource served under `/api/{resource}/...`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Asset,
    Action,
}

impl Resource {
    /// Resource segments are matched case-insensitively, like the real API does.
    pub fn parse(segment: &str) -> Result<Self, MockError> {
        if segment.eq_ignore_ascii_case(Asset::RESOURCE) {
            Ok(Resource::Asset)
        } else if segment.eq_ignore_ascii_case(Action::RESOURCE) {
            Ok(Resource::Action)
        } else {
            Err(MockError::BadRequest(format!("Unknown resource {segment}")))
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Resource::Asset => Asset::RESOURCE,
            Resource::Action => Action::RESOURCE,
        }
    }
}

impl MockState {
    pub fn new(config: MockConfig, fixtures: Fixtures) -> Self {
        Self {
            config: Arc::new(config),
            inner: Arc::new(Mutex::new(Inner {
                assets: fixtures.assets,
                actions: fixtures.actions,
                access_tokens: HashMap::new(),
                refresh_tokens: HashMap::new(),
                batches: HashMap::new(),
                stats: Stats::default(),
            })),
        }
    }

    pub fn config(&self) -> &MockConfig {
        &self.config
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn stats(&self) -> Stats {
        self.lock().stats.clone()
    }

    /// Invalidates every issued access and refresh token.
    pub fn revoke_all(&self) {
        let mut inner = self.lock();
        inner.access_tokens.clear();
        inner.refresh_tokens.clear();
    }

    pub fn grant(&self, request: &TokenRequest) -> Result<TokenGrant, MockError> {
        let mut inner = self.lock();

        let username = match request.grant_type.as_str() {
            grants::PASSWORD => {
                inner.stats.password_grants += 1;
                let valid = request.username.as_deref() == Some(self.config.username.as_str())
                    && request.password.as_deref() == Some(self.config.password.as_str());
                if !valid {
                    return Err(MockError::invalid_grant(
                        "The user name or password is incorrect.",
                    ));
                }
                self.config.username.clone()
            }
            grants::REFRESH_TOKEN => {
                inner.stats.refresh_grants += 1;
                request
                    .refresh_token
                    .as_ref()
                    .and_then(|t| inner.refresh_tokens.remove(t))
                    .ok_or_else(|| MockError::invalid_grant("Invalid refresh token."))?
            }
            other => {
                return Err(MockError::Grant {
                    error: "unsupported_grant_type".to_string(),
                    description: format!("Grant type {other} is not supported."),
                });
            }
        };

        let access_token = Uuid::new_v4().simple().to_string();
        let refresh_token = Uuid::new_v4().simple().to_string();
        inner.access_tokens.insert(
            access_token.clone(),
            Issued {
                username: username.clone(),
                expires_at: Instant::now() + self.config.token_ttl,
            },
        );
        inner.refresh_tokens.insert(refresh_token.clone(), username);

        Ok(TokenGrant {
            access_token,
            refresh_token,
            expires_in: self.config.token_ttl.as_secs() as i64,
            token_type: Some("bearer".to_string()),
        })
    }

    /// Returns the user an access token was issued to.
    pub fn verify(&self, access_token: &str) -> Result<String, MockError> {
        let inner = self.lock();
        match inner.access_tokens.get(access_token) {
            Some(issued) if issued.expires_at > Instant::now() => Ok(issued.username.clone()),
            _ => Err(MockError::Unauthorized),
        }
    }

    pub fn get(&self, resource: Resource, id: i64) -> Result<Map<String, Value>, MockError> {
        let inner = self.lock();
        inner
            .records(resource)
            .get(&id)
            .cloned()
            .ok_or_else(|| MockError::NotFound {
                resource: resource.name().to_string(),
                id: id.to_string(),
            })
    }

    pub fn find_by_field(
        &self,
        resource: Resource,
        field: &str,
        value: &str,
    ) -> Result<Map<String, Value>, MockError> {
        let inner = self.lock();
        let matches: Vec<_> = inner
            .records(resource)
            .values()
            .filter(|r| crate::fixtures::field_matches(r, field, value))
            .collect();

        match matches.as_slice() {
            [only] => Ok((*only).clone()),
            _ => Err(MockError::NoUniqueMatch {
                resource: resource.name().to_string(),
                field: field.to_string(),
                count: matches.len(),
            }),
        }
    }

    pub fn delete(&self, resource: Resource, id: i64) -> Result<(), MockError> {
        let mut inner = self.lock();
        inner
            .records_mut(resource)
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| MockError::NotFound {
                resource: resource.name().to_string(),
                id: id.to_string(),
            })
    }

    /// Validates an uploaded file and registers a new batch for it.
    ///
    /// Every data row's `TypeID` must be one of [`MockConfig::valid_type_ids`];
    /// files without a `TypeID` column always pass.
    pub fn import(&self, import_type: ImportType, contents: &str) -> Result<Uuid, MockError> {
        let upload =
            ErrorReport::parse(contents).map_err(|e| MockError::BadRequest(e.to_string()))?;
        let header = upload
            .header()
            .ok_or_else(|| MockError::BadRequest("The uploaded file is empty.".to_string()))?;
        let type_column = header.iter().position(|h| h == "TypeID");

        let failures: Vec<Vec<String>> = upload
            .rows()
            .iter()
            .enumerate()
            .filter_map(|(i, row)| {
                let column = type_column?;
                let value = row.get(column).map(String::as_str).unwrap_or_default();
                let valid = value
                    .trim()
                    .parse::<i64>()
                    .is_ok_and(|id| self.config.valid_type_ids.contains(&id));
                (!valid).then(|| {
                    vec![
                        (i + 1).to_string(),
                        "TypeID".to_string(),
                        format!("'{value}' is not a valid {import_type} type."),
                    ]
                })
            })
            .collect();

        let batch = if failures.is_empty() {
            Batch {
                polls_left: self.config.processing_polls,
                error: None,
                report: None,
            }
        } else {
            let total = upload.row_count();
            let report = ErrorReport::new(
                vec!["Row".to_string(), "Field".to_string(), "Message".to_string()],
                failures,
            );
            Batch {
                polls_left: self.config.processing_polls,
                error: Some(format!(
                    "{} of {total} rows failed validation. {OUTPUT_TO_CSV} to review the errors.",
                    report.row_count()
                )),
                report: Some(report.to_csv()),
            }
        };

        let id = Uuid::new_v4();
        self.lock().batches.insert(id, batch);
        Ok(id)
    }

    pub fn batch_state(&self, batch: &Uuid) -> Result<BatchState, MockError> {
        let mut inner = self.lock();
        inner.stats.state_polls += 1;
        let entry = inner.batches.get_mut(batch).ok_or_else(|| MockError::NotFound {
            resource: "Batch".to_string(),
            id: batch.to_string(),
        })?;

        if entry.polls_left > 0 {
            entry.polls_left -= 1;
            return Ok(BatchState::processing());
        }

        Ok(match &entry.error {
            Some(error) => BatchState::failed(error.clone()),
            None => BatchState::completed(),
        })
    }

    pub fn batch_report(&self, batch: &Uuid) -> Result<String, MockError> {
        let inner = self.lock();
        inner
            .batches
            .get(batch)
            .and_then(|b| b.report.clone())
            .ok_or_else(|| MockError::NotFound {
                resource: "Error report".to_string(),
                id: batch.to_string(),
            })
    }
}

impl Inner {
    fn records(&self, resource: Resource) -> &BTreeMap<i64, Map<String, Value>> {
        match resource {
            Resource::Asset => &self.assets,
            Resource::Action => &self.actions,
        }
    }

    fn records_mut(&mut self, resource: Resource) -> &mut BTreeMap<i64, Map<String, Value>> {
        match resource {
            Resource::Asset => &mut self.assets,
            Resource::Action => &mut self.actions,
        }
    }
}
