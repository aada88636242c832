//! GraphQL query composition.
//!
//! Queries are assembled from typed [`Field`] nodes and serialized only when the
//! request is sent. The username never appears in the query text: it is bound
//! as the `$login` variable, so no escaping of user input is needed.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::constants::MAX_REPOSITORIES;
use crate::utils::datetime::year_window;

/// Response key of the unaliased (current year) contribution collection.
pub const CURRENT_COLLECTION_KEY: &str = "contributionsCollection";

/// Name of the variable carrying the username.
pub const LOGIN_VARIABLE: &str = "login";

/// Value passed to a field argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Argument {
    Int(u32),
    String(String),
    Variable(String),
}

impl Argument {
    fn write(&self, out: &mut String) {
        match self {
            Argument::Int(value) => out.push_str(&value.to_string()),
            // GraphQL string literals accept the JSON escape set
            Argument::String(value) => {
                out.push_str(&serde_json::to_string(value).unwrap_or_else(|_| "\"\"".to_string()))
            }
            Argument::Variable(name) => {
                out.push('$');
                out.push_str(name);
            }
        }
    }
}

/// A field selection, optionally aliased, with arguments and sub-selections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub alias: Option<String>,
    pub name: String,
    pub arguments: Vec<(String, Argument)>,
    pub selections: Vec<Field>,
}

impl Field {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            alias: None,
            name: name.into(),
            arguments: Vec::new(),
            selections: Vec::new(),
        }
    }

    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    pub fn arg(mut self, name: impl Into<String>, value: Argument) -> Self {
        self.arguments.push((name.into(), value));
        self
    }

    pub fn select(mut self, field: Field) -> Self {
        self.selections.push(field);
        self
    }

    /// Key under which this field appears in the response object.
    pub fn response_key(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }

    /// Direct sub-selection by response key.
    pub fn selection(&self, key: &str) -> Option<&Field> {
        self.selections.iter().find(|field| field.response_key() == key)
    }

    fn write(&self, out: &mut String, depth: usize) {
        indent(out, depth);
        if let Some(alias) = &self.alias {
            out.push_str(alias);
            out.push_str(": ");
        }
        out.push_str(&self.name);

        if !self.arguments.is_empty() {
            out.push('(');
            for (index, (name, value)) in self.arguments.iter().enumerate() {
                if index > 0 {
                    out.push_str(", ");
                }
                out.push_str(name);
                out.push_str(": ");
                value.write(out);
            }
            out.push(')');
        }

        if !self.selections.is_empty() {
            out.push_str(" {\n");
            for field in &self.selections {
                field.write(out, depth + 1);
            }
            indent(out, depth);
            out.push('}');
        }
        out.push('\n');
    }
}

fn indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str("  ");
    }
}

/// Operation variable declaration, e.g. `$login: String!`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableDefinition {
    pub name: String,
    pub type_name: String,
}

/// A complete GraphQL query operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryDocument {
    pub operation_name: String,
    pub variables: Vec<VariableDefinition>,
    pub selections: Vec<Field>,
}

impl QueryDocument {
    pub fn new(operation_name: impl Into<String>) -> Self {
        Self {
            operation_name: operation_name.into(),
            variables: Vec::new(),
            selections: Vec::new(),
        }
    }

    pub fn variable(mut self, name: impl Into<String>, type_name: impl Into<String>) -> Self {
        self.variables.push(VariableDefinition {
            name: name.into(),
            type_name: type_name.into(),
        });
        self
    }

    pub fn select(mut self, field: Field) -> Self {
        self.selections.push(field);
        self
    }

    /// Top-level selection by response key.
    pub fn selection(&self, key: &str) -> Option<&Field> {
        self.selections.iter().find(|field| field.response_key() == key)
    }

    /// Serialize to GraphQL query text.
    pub fn to_query_string(&self) -> String {
        let mut out = String::from("query ");
        out.push_str(&self.operation_name);

        if !self.variables.is_empty() {
            out.push('(');
            let definitions: Vec<String> = self
                .variables
                .iter()
                .map(|var| format!("${}: {}", var.name, var.type_name))
                .collect();
            out.push_str(&definitions.join(", "));
            out.push(')');
        }

        out.push_str(" {\n");
        for field in &self.selections {
            field.write(&mut out, 1);
        }
        out.push_str("}\n");
        out
    }
}

/// Query document plus the variable values bound to it.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphQlRequest {
    pub document: QueryDocument,
    pub variables: Map<String, Value>,
}

/// Wire body: `{"query": ..., "variables": {...}}`.
#[derive(Debug, Serialize)]
pub struct RequestBody<'a> {
    pub query: String,
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub variables: &'a Map<String, Value>,
}

impl GraphQlRequest {
    pub fn new(document: QueryDocument) -> Self {
        Self {
            document,
            variables: Map::new(),
        }
    }

    /// Bind a variable value, replacing any previous binding.
    pub fn with_variable(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.variables.insert(name.to_string(), value.into());
        self
    }

    /// Copy of this request with `$login` bound to `username`.
    pub fn bind_login(&self, username: &str) -> Self {
        self.clone().with_variable(LOGIN_VARIABLE, username)
    }

    pub fn body(&self) -> RequestBody<'_> {
        RequestBody {
            query: self.document.to_query_string(),
            variables: &self.variables,
        }
    }
}

/// Alias of the contribution collection for a historical year.
pub fn collection_alias(year: i32) -> String {
    format!("{CURRENT_COLLECTION_KEY}{year}")
}

fn repository_field() -> Field {
    Field::new("repository")
        .select(Field::new("nameWithOwner"))
        .select(Field::new("url"))
        .select(Field::new("isPrivate"))
        .select(Field::new("isFork"))
}

fn by_repository(name: &str) -> Field {
    Field::new(name)
        .arg("maxRepositories", Argument::Int(MAX_REPOSITORIES))
        .select(repository_field())
}

fn repository_contributions() -> Field {
    Field::new("repositoryContributions")
        .arg("first", Argument::Int(MAX_REPOSITORIES))
        .select(Field::new("edges").select(Field::new("node").select(repository_field())))
}

/// Current-year collection with all five contribution types.
pub fn current_year_collection() -> Field {
    Field::new(CURRENT_COLLECTION_KEY)
        .select(by_repository("commitContributionsByRepository"))
        .select(by_repository("pullRequestContributionsByRepository"))
        .select(by_repository("issueContributionsByRepository"))
        .select(by_repository("pullRequestReviewContributionsByRepository"))
        .select(repository_contributions())
}

/// Historical collection scoped to one calendar year.
///
/// Only commits, pull requests and direct repository contributions are
/// requested; issues and reviews are limited to the current year.
pub fn year_collection(year: i32) -> Field {
    let (from, to) = year_window(year);
    Field::new(CURRENT_COLLECTION_KEY)
        .alias(collection_alias(year))
        .arg("from", Argument::String(from))
        .arg("to", Argument::String(to))
        .select(by_repository("commitContributionsByRepository"))
        .select(by_repository("pullRequestContributionsByRepository"))
        .select(repository_contributions())
}

fn user_field() -> Field {
    Field::new("user").arg("login", Argument::Variable(LOGIN_VARIABLE.to_string()))
}

/// Build the contribution query covering `[creation_year, current_year)` plus
/// the current year.
///
/// An empty year range (`creation_year >= current_year`) yields only the
/// current-year block.
pub fn build_contributions_query(creation_year: i32, current_year: i32) -> GraphQlRequest {
    let mut user = user_field().select(current_year_collection());
    for year in creation_year..current_year {
        user = user.select(year_collection(year));
    }

    GraphQlRequest::new(
        QueryDocument::new("Contributions")
            .variable(LOGIN_VARIABLE, "String!")
            .select(user),
    )
}

/// Minimal identity query used to validate a token.
pub fn build_viewer_query() -> GraphQlRequest {
    GraphQlRequest::new(QueryDocument::new("Viewer").select(Field::new("viewer").select(Field::new("login"))))
}

/// Account creation timestamp lookup.
pub fn build_creation_query() -> GraphQlRequest {
    GraphQlRequest::new(
        QueryDocument::new("AccountCreation")
            .variable(LOGIN_VARIABLE, "String!")
            .select(user_field().select(Field::new("createdAt"))),
    )
}
