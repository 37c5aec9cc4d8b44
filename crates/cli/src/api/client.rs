//! Blocking HTTP implementation of the admin API
//!
//! Every request of one command draws its timeout from a single
//! [`Deadline`]. Failures are never retried: a 409 or 404 is reported as the
//! service sent it.

use super::deadline::Deadline;
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::Url;
use serde::de::DeserializeOwned;
use serde_json::{json, Map, Value};
use simpleflags_compiler::model::{
    Account, ApiKeyBody, ApiKeyResponse, CreateAccountBody, CreateFlagBody, Environment, Flag,
    LoginRequest, LoginResponse, PatchVariableBody, Project, ProjectScope, SignupBody, Tag,
    Variable, VariableScope,
};
use simpleflags_compiler::{AdminApi, PatchInstructionSet, RemoteError, RemoteResult};
use std::time::Duration;

const USER_AGENT: &str = concat!("sf/", env!("SF_VERSION"));
const MAX_ERROR_BODY: usize = 400;

pub struct HttpAdminApi {
    http: Client,
    base_url: Url,
    token: Option<String>,
    deadline: Deadline,
}

impl HttpAdminApi {
    pub fn new(base_url: &str, token: Option<String>, timeout: Duration) -> RemoteResult<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| RemoteError::InvalidPath(format!("server URL '{base_url}': {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(RemoteError::InvalidPath(format!(
                "server URL '{base_url}' cannot carry a path"
            )));
        }
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| RemoteError::Transport(format!("failed to create HTTP client: {e}")))?;
        Ok(Self {
            http,
            base_url,
            token,
            deadline: Deadline::after(timeout),
        })
    }

    /// Base URL plus one percent-encoded path segment per item, so an
    /// identifier can never address another resource.
    fn url(&self, segments: &[&str]) -> RemoteResult<Url> {
        if let Some(segment) = segments
            .iter()
            .find(|segment| matches!(**segment, "" | "." | ".."))
        {
            return Err(RemoteError::InvalidPath(format!(
                "'{segment}' is not a valid identifier"
            )));
        }
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                RemoteError::InvalidPath(format!("{} cannot carry a path", self.base_url))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn project_url(&self, scope: &ProjectScope, rest: &[&str]) -> RemoteResult<Url> {
        let mut segments = vec![
            "accounts",
            scope.account.as_str(),
            "projects",
            scope.project.as_str(),
        ];
        segments.extend_from_slice(rest);
        self.url(&segments)
    }

    fn send(&self, operation: &str, request: RequestBuilder) -> RemoteResult<Response> {
        let remaining = self.deadline.check(operation)?;
        let mut request = request.timeout(remaining);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        tracing::debug!(operation, "sending request");
        let response = request
            .send()
            .map_err(|e| transport_error(operation, &e))?;

        let status = response.status();
        tracing::debug!(operation, status = status.as_u16(), "response received");
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().unwrap_or_default();
        Err(RemoteError::from_status(
            status.as_u16(),
            error_message(operation, &body),
        ))
    }

    fn json<T: DeserializeOwned>(&self, operation: &str, request: RequestBuilder) -> RemoteResult<T> {
        self.send(operation, request)?.json::<T>().map_err(|e| {
            if e.is_timeout() {
                RemoteError::Timeout(format!("{operation}: {e}"))
            } else {
                RemoteError::InvalidResponse(format!("{operation}: {e}"))
            }
        })
    }

    fn empty(&self, operation: &str, request: RequestBuilder) -> RemoteResult<()> {
        self.send(operation, request).map(|_| ())
    }

    /// Evaluate flags server-side with an API key instead of the session.
    pub fn evaluate(
        &self,
        api_key: &str,
        identifiers: &[String],
        target: &Map<String, Value>,
    ) -> RemoteResult<Value> {
        let body = json!({
            "identifiers": identifiers,
            "target": target,
        });
        self.json(
            "evaluate",
            self.http
                .post(self.url(&["client", "evaluate"])?)
                .header("API-Key", api_key)
                .json(&body),
        )
    }
}

fn transport_error(operation: &str, e: &reqwest::Error) -> RemoteError {
    if e.is_timeout() {
        RemoteError::Timeout(format!("{operation}: {e}"))
    } else {
        RemoteError::Transport(format!("{operation}: {e}"))
    }
}

/// Prefer the service's `message` field; fall back to the raw body.
fn error_message(operation: &str, body: &str) -> String {
    if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(body) {
        for key in ["message", "error"] {
            if let Some(Value::String(message)) = map.get(key) {
                return message.clone();
            }
        }
    }
    let body = body.trim();
    if body.is_empty() {
        return operation.to_string();
    }
    body.chars().take(MAX_ERROR_BODY).collect()
}

impl AdminApi for HttpAdminApi {
    fn get_accounts(&self) -> RemoteResult<Vec<Account>> {
        self.json("get_accounts", self.http.get(self.url(&["accounts"])?))
    }

    fn create_account(&self, body: &CreateAccountBody) -> RemoteResult<Account> {
        self.json(
            "create_account",
            self.http.post(self.url(&["accounts"])?).json(body),
        )
    }

    fn delete_account(&self, account: &str) -> RemoteResult<()> {
        self.empty(
            "delete_account",
            self.http.delete(self.url(&["accounts", account])?),
        )
    }

    fn get_environments(&self, account: Option<&str>) -> RemoteResult<Vec<Environment>> {
        let mut request = self.http.get(self.url(&["environments"])?);
        if let Some(account) = account {
            request = request.query(&[("account", account)]);
        }
        self.json("get_environments", request)
    }

    fn create_environment(&self, body: &Environment) -> RemoteResult<()> {
        let url = self.url(&["accounts", &body.account, "environments"])?;
        self.empty("create_environment", self.http.post(url).json(body))
    }

    fn delete_environment(&self, account: &str, identifier: &str) -> RemoteResult<()> {
        let url = self.url(&["accounts", account, "environments", identifier])?;
        self.empty("delete_environment", self.http.delete(url))
    }

    fn get_projects(&self, account: Option<&str>) -> RemoteResult<Vec<Project>> {
        let mut request = self.http.get(self.url(&["projects"])?);
        if let Some(account) = account {
            request = request.query(&[("account", account)]);
        }
        self.json("get_projects", request)
    }

    fn create_project(&self, body: &Project) -> RemoteResult<()> {
        let url = self.url(&["accounts", &body.account, "projects"])?;
        self.empty("create_project", self.http.post(url).json(body))
    }

    fn delete_project(&self, account: &str, identifier: &str) -> RemoteResult<()> {
        let url = self.url(&["accounts", account, "projects", identifier])?;
        self.empty("delete_project", self.http.delete(url))
    }

    fn get_flags(&self, scope: &ProjectScope) -> RemoteResult<Vec<Flag>> {
        let url = self.project_url(scope, &["flags"])?;
        self.json("get_flags", self.http.get(url))
    }

    fn get_flag(&self, scope: &ProjectScope, identifier: &str) -> RemoteResult<Flag> {
        let url = self.project_url(scope, &["flags", identifier])?;
        self.json("get_flag", self.http.get(url))
    }

    fn create_flag(&self, body: &CreateFlagBody) -> RemoteResult<()> {
        let url = self.url(&["accounts", &body.account, "projects", &body.project, "flags"])?;
        self.empty("create_flag", self.http.post(url).json(body))
    }

    fn patch_flag(
        &self,
        scope: &ProjectScope,
        identifier: &str,
        instructions: &PatchInstructionSet,
    ) -> RemoteResult<()> {
        let url = self.project_url(scope, &["flags", identifier])?;
        self.empty("patch_flag", self.http.patch(url).json(instructions))
    }

    fn delete_flag(&self, scope: &ProjectScope, identifier: &str) -> RemoteResult<()> {
        let url = self.project_url(scope, &["flags", identifier])?;
        self.empty("delete_flag", self.http.delete(url))
    }

    fn get_tags(&self, scope: &ProjectScope, identifier: Option<&str>) -> RemoteResult<Vec<Tag>> {
        let mut request = self.http.get(self.project_url(scope, &["tags"])?);
        if let Some(identifier) = identifier {
            request = request.query(&[("identifier", identifier)]);
        }
        self.json("get_tags", request)
    }

    fn get_variables(
        &self,
        scope: &VariableScope,
        identifier: Option<&str>,
    ) -> RemoteResult<Vec<Variable>> {
        let mut request = self
            .http
            .get(self.url(&["accounts", &scope.account, "variables"])?);
        if let Some(project) = &scope.project {
            request = request.query(&[("project", project.as_str())]);
        }
        if let Some(identifier) = identifier {
            request = request.query(&[("identifier", identifier)]);
        }
        self.json("get_variables", request)
    }

    fn create_variable(&self, body: &Variable) -> RemoteResult<()> {
        let url = self.url(&["accounts", &body.account, "variables"])?;
        self.empty("create_variable", self.http.post(url).json(body))
    }

    fn patch_variable(
        &self,
        scope: &VariableScope,
        environment: &str,
        identifier: &str,
        body: &PatchVariableBody,
    ) -> RemoteResult<()> {
        let url = self.url(&["accounts", &scope.account, "variables", identifier])?;
        let mut request = self
            .http
            .patch(url)
            .query(&[("environment", environment)]);
        if let Some(project) = &scope.project {
            request = request.query(&[("project", project.as_str())]);
        }
        self.empty("patch_variable", request.json(body))
    }

    fn delete_variable(&self, scope: &VariableScope, identifier: &str) -> RemoteResult<()> {
        let url = self.url(&["accounts", &scope.account, "variables", identifier])?;
        let mut request = self.http.delete(url);
        if let Some(project) = &scope.project {
            request = request.query(&[("project", project.as_str())]);
        }
        self.empty("delete_variable", request)
    }

    fn create_api_key(&self, body: &ApiKeyBody) -> RemoteResult<ApiKeyResponse> {
        let url = self.url(&["accounts", &body.account, "projects", &body.project, "keys"])?;
        self.json("create_api_key", self.http.post(url).json(body))
    }

    fn delete_api_key(
        &self,
        scope: &ProjectScope,
        environment: Option<&str>,
        identifier: &str,
    ) -> RemoteResult<()> {
        let mut request = self
            .http
            .delete(self.project_url(scope, &["keys", identifier])?);
        if let Some(environment) = environment {
            request = request.query(&[("environment", environment)]);
        }
        self.empty("delete_api_key", request)
    }

    fn authenticate(&self, body: &LoginRequest) -> RemoteResult<LoginResponse> {
        self.json(
            "authenticate",
            self.http.post(self.url(&["auth", "login"])?).json(body),
        )
    }

    fn signup(&self, body: &SignupBody) -> RemoteResult<()> {
        self.empty(
            "signup",
            self.http.post(self.url(&["auth", "signup"])?).json(body),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use simpleflags_compiler::resolver::{resolve_flag, EntityExistence};
    use simpleflags_compiler::StatusCategory;

    fn client(server: &MockServer) -> HttpAdminApi {
        HttpAdminApi::new(
            &server.base_url(),
            Some("session-token".to_string()),
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[test]
    fn test_get_flag_sends_bearer_token() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/accounts/acme/projects/web/flags/dark-mode")
                .header("authorization", "Bearer session-token");
            then.status(200)
                .json_body(json!({"identifier": "dark-mode", "name": "Dark Mode", "version": 3}));
        });

        let flag = client(&server)
            .get_flag(&ProjectScope::new("acme", "web"), "dark-mode")
            .unwrap();
        mock.assert();
        assert_eq!(flag.name, "Dark Mode");
        assert_eq!(flag.version, 3);
    }

    #[test]
    fn test_status_codes_map_to_categories() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/accounts/acme/projects/web/flags");
            then.status(409).json_body(json!({"message": "flag already exists"}));
        });
        server.mock(|when, then| {
            when.method(DELETE).path("/accounts/acme");
            then.status(403).body("forbidden");
        });
        server.mock(|when, then| {
            when.method(GET).path("/accounts");
            then.status(502);
        });

        let api = client(&server);
        let body = CreateFlagBody {
            account: "acme".to_string(),
            project: "web".to_string(),
            identifier: "dark-mode".to_string(),
            name: "Dark Mode".to_string(),
            description: None,
            permanent: false,
            environments: Default::default(),
            tags: Vec::new(),
        };
        assert_eq!(
            api.create_flag(&body),
            Err(RemoteError::Conflict("flag already exists".to_string()))
        );
        assert_eq!(
            api.delete_account("acme").unwrap_err().category(),
            StatusCategory::Forbidden
        );
        assert_eq!(
            api.get_accounts().unwrap_err().category(),
            StatusCategory::Server
        );
    }

    #[test]
    fn test_patch_body_is_sparse() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(PATCH)
                .path("/accounts/acme/projects/web/flags/dark-mode")
                .json_body(json!({"addTags": ["beta"]}));
            then.status(204);
        });

        let patch = PatchInstructionSet {
            add_tags: Some(vec!["beta".to_string()]),
            ..PatchInstructionSet::default()
        };
        client(&server)
            .patch_flag(&ProjectScope::new("acme", "web"), "dark-mode", &patch)
            .unwrap();
        mock.assert();
    }

    #[test]
    fn test_resolver_falls_back_to_tags_over_http() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/accounts/acme/projects/web/flags/beta");
            then.status(404).json_body(json!({"message": "flag not found"}));
        });
        let tags = server.mock(|when, then| {
            when.method(GET)
                .path("/accounts/acme/projects/web/tags")
                .query_param("identifier", "beta");
            then.status(200)
                .json_body(json!([{"identifier": "beta", "name": "beta", "flags": ["a"]}]));
        });

        let api = client(&server);
        let existence = resolve_flag(&api, &ProjectScope::new("acme", "web"), "beta").unwrap();
        tags.assert();
        assert_eq!(
            existence,
            EntityExistence::ExistsByTag {
                tag: "beta".to_string()
            }
        );
    }

    #[test]
    fn test_unauthorized_lookup_is_an_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/accounts/acme/projects/web/flags/beta");
            then.status(401).body("");
        });
        let tags = server.mock(|when, then| {
            when.method(GET).path("/accounts/acme/projects/web/tags");
            then.status(200).json_body(json!([]));
        });

        let result = resolve_flag(&client(&server), &ProjectScope::new("acme", "web"), "beta");
        assert_eq!(
            result,
            Err(RemoteError::Unauthorized("get_flag".to_string()))
        );
        tags.assert_calls(0);
    }

    #[test]
    fn test_variable_patch_carries_environment_and_project() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(PATCH)
                .path("/accounts/acme/variables/theme")
                .query_param("environment", "prod")
                .query_param("project", "web")
                .json_body(json!({"value": 42}));
            then.status(200);
        });

        client(&server)
            .patch_variable(
                &VariableScope::project("acme", "web"),
                "prod",
                "theme",
                &PatchVariableBody {
                    value: simpleflags_compiler::coerce("42"),
                },
            )
            .unwrap();
        mock.assert();
    }

    #[test]
    fn test_evaluate_uses_api_key_header() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/client/evaluate")
                .header("API-Key", "sf-key")
                .json_body(json!({"identifiers": ["dark-mode"], "target": {"plan": "pro"}}));
            then.status(200).json_body(json!({"dark-mode": true}));
        });

        let mut target = Map::new();
        target.insert("plan".to_string(), json!("pro"));
        let result = client(&server)
            .evaluate("sf-key", &["dark-mode".to_string()], &target)
            .unwrap();
        mock.assert();
        assert_eq!(result, json!({"dark-mode": true}));
    }

    #[test]
    fn test_connection_failure_is_transport_error() {
        let api = HttpAdminApi::new("http://127.0.0.1:1", None, Duration::from_secs(2)).unwrap();
        let err = api.get_accounts().unwrap_err();
        assert!(matches!(
            err.category(),
            StatusCategory::Transport | StatusCategory::Timeout
        ));
    }

    #[test]
    fn test_spent_deadline_sends_nothing() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/accounts");
            then.status(200).json_body(json!([]));
        });
        let api = HttpAdminApi::new(&server.base_url(), None, Duration::ZERO).unwrap();
        assert!(matches!(api.get_accounts(), Err(RemoteError::Timeout(_))));
        mock.assert_calls(0);
    }

    #[test]
    fn test_identifiers_are_encoded_as_single_segments() {
        let api = HttpAdminApi::new("https://api.example.com/v1/", None, Duration::from_secs(5))
            .unwrap();
        assert_eq!(
            api.url(&["accounts", "a b/c"]).unwrap().as_str(),
            "https://api.example.com/v1/accounts/a%20b%2Fc"
        );
        assert_eq!(
            api.url(&["flags", "x?y=1#z"]).unwrap().as_str(),
            "https://api.example.com/v1/flags/x%3Fy=1%23z"
        );
        assert_eq!(
            api.url(&["auth", "login"]).unwrap().as_str(),
            "https://api.example.com/v1/auth/login"
        );
    }

    #[test]
    fn test_flag_delete_cannot_reach_parent_project() {
        let server = MockServer::start();
        let project = server.mock(|when, then| {
            when.method(DELETE).path("/accounts/acme/projects/web");
            then.status(204);
        });

        let api = client(&server);
        let scope = ProjectScope::new("acme", "web");
        let err = api.delete_flag(&scope, "../../web").unwrap_err();
        assert!(err.is_not_found());
        project.assert_calls(0);
    }

    #[test]
    fn test_dot_segments_are_refused_before_sending() {
        let server = MockServer::start();
        let flags = server.mock(|when, then| {
            when.method(DELETE);
            then.status(204);
        });

        let api = client(&server);
        let scope = ProjectScope::new("acme", "web");
        for identifier in ["..", ".", ""] {
            let err = api.delete_flag(&scope, identifier).unwrap_err();
            assert!(matches!(err, RemoteError::InvalidPath(_)), "{identifier:?}");
        }
        let err = api.delete_account("..").unwrap_err();
        assert!(matches!(err, RemoteError::InvalidPath(_)));
        flags.assert_calls(0);
    }

    #[test]
    fn test_error_message_extraction() {
        assert_eq!(error_message("op", r#"{"message":"nope"}"#), "nope");
        assert_eq!(error_message("op", r#"{"error":"bad"}"#), "bad");
        assert_eq!(error_message("op", "  "), "op");
        assert_eq!(error_message("op", "plain"), "plain");
    }
}
