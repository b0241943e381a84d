//! In-memory transport for tests

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use crate::transport::Transport;
use crate::{Error, Result};

/// A request seen by [`FakeTransport`]
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Call {
    Get {
        path: String,
        query: Vec<(String, String)>,
    },
    GraphQl {
        query: String,
        variables: Value,
    },
}

struct GraphQlRoute {
    marker: String,
    variable: Option<(String, Value)>,
    response: Value,
}

/// Serves canned JSON and records every call
///
/// REST responses are keyed by path. GraphQL responses match on a marker
/// substring of the query and optionally one variable; the first matching
/// route wins. Unmatched requests fail with a 404 status error.
#[derive(Default)]
pub(crate) struct FakeTransport {
    rest: HashMap<String, Value>,
    graphql: Vec<GraphQlRoute>,
    calls: Mutex<Vec<Call>>,
}

impl FakeTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_rest(mut self, path: &str, response: Value) -> Self {
        self.rest.insert(path.to_string(), response);
        self
    }

    pub(crate) fn with_graphql(mut self, marker: &str, response: Value) -> Self {
        self.graphql.push(GraphQlRoute {
            marker: marker.to_string(),
            variable: None,
            response,
        });
        self
    }

    pub(crate) fn with_graphql_for(
        mut self,
        marker: &str,
        variable: &str,
        value: Value,
        response: Value,
    ) -> Self {
        self.graphql.push(GraphQlRoute {
            marker: marker.to_string(),
            variable: Some((variable.to_string(), value)),
            response,
        });
        self
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    /// Paths of every REST GET, in order
    pub(crate) fn get_paths(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Get { path, .. } => Some(path),
                Call::GraphQl { .. } => None,
            })
            .collect()
    }

    /// Variables of every GraphQL call whose query contains `marker`
    pub(crate) fn graphql_variables(&self, marker: &str) -> Vec<Value> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::GraphQl { query, variables } if query.contains(marker) => Some(variables),
                _ => None,
            })
            .collect()
    }

    fn not_found(what: String) -> Error {
        Error::Status {
            status: 404,
            body: format!("no fake response for {}", what),
        }
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn get_json(&self, path: &str, query: &[(&str, String)]) -> Result<Value> {
        self.calls.lock().unwrap().push(Call::Get {
            path: path.to_string(),
            query: query
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
        });

        self.rest
            .get(path)
            .cloned()
            .ok_or_else(|| Self::not_found(path.to_string()))
    }

    async fn post_graphql(&self, body: &Value) -> Result<Value> {
        let query = body["query"].as_str().unwrap_or_default().to_string();
        let variables = body["variables"].clone();

        self.calls.lock().unwrap().push(Call::GraphQl {
            query: query.clone(),
            variables: variables.clone(),
        });

        self.graphql
            .iter()
            .find(|route| {
                query.contains(&route.marker)
                    && route
                        .variable
                        .as_ref()
                        .map_or(true, |(name, value)| &variables[name.as_str()] == value)
            })
            .map(|route| route.response.clone())
            .ok_or_else(|| Self::not_found(format!("GraphQL query with {}", variables)))
    }
}
