//! # Project Lookup
//!
//! Fetches a Jira project and flattens the attributes opjira tracks into a
//! plain key/value record. Attributes that are missing, null or empty are left
//! out of the record entirely.

use std::collections::BTreeMap;

use opjira_core::{CredentialResolver, Error, OpRunner, Result};
use serde_json::Value;

use crate::auth::{JiraSettings, connect};
use crate::models::JiraProject;

/// Flat view of a project: field name to scalar value
pub type ProjectRecord = BTreeMap<String, Value>;

impl JiraProject {
  /// Project the tracked attributes into a [`ProjectRecord`]
  pub fn to_record(&self) -> ProjectRecord {
    let mut record = ProjectRecord::new();

    insert_text(&mut record, "key", self.key.as_deref());
    insert_text(&mut record, "name", self.name.as_deref());
    insert_text(&mut record, "description", self.description.as_deref());
    insert_text(
      &mut record,
      "lead",
      self.lead.as_ref().and_then(|lead| lead.display_name.as_deref()),
    );
    insert_text(&mut record, "url", self.self_url.as_deref());
    insert_text(&mut record, "project_type", self.project_type_key.as_deref());
    insert_flag(&mut record, "archived", self.archived);
    insert_flag(&mut record, "is_private", self.is_private);
    insert_flag(&mut record, "simplified", self.simplified);

    record
  }
}

fn insert_text(record: &mut ProjectRecord, field: &str, value: Option<&str>) {
  if let Some(value) = value.filter(|value| !value.is_empty()) {
    record.insert(field.to_string(), Value::String(value.to_string()));
  }
}

fn insert_flag(record: &mut ProjectRecord, field: &str, value: Option<bool>) {
  if let Some(value) = value {
    record.insert(field.to_string(), Value::Bool(value));
  }
}

/// Connect to Jira and fetch one project as a [`ProjectRecord`].
///
/// Every failure is reported as [`Error::Retrieval`] naming `project_id`.
pub async fn fetch_project<R: OpRunner>(
  project_id: &str,
  settings: &JiraSettings,
  resolver: &CredentialResolver<R>,
) -> Result<ProjectRecord> {
  let resource = format!("project '{project_id}'");

  let client = connect(settings, resolver).map_err(|e| Error::retrieval(&resource, e))?;
  let project = client
    .get_project(project_id)
    .await
    .map_err(|e| Error::retrieval(&resource, e))?;

  Ok(project.to_record())
}
