use super::rpc::RpcClient;
use crate::domain::model::{Room, SchoolClass, Subject, Teacher, WeekRange};
use crate::domain::ports::{Credentials, ProviderResult, ProviderSession, TimetableProvider};
use crate::domain::raw::RawPeriodEntry;
use crate::utils::error::{ProviderError, Result, TimetableError};
use async_trait::async_trait;
use chrono::{Datelike, NaiveDate};
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use url::Url;

/// Element type of a class in WebUntis timetable requests.
const ELEMENT_TYPE_CLASS: u8 = 1;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AuthResult {
    #[serde(default)]
    session_id: Option<String>,
}

/// Opens WebUntis sessions for one school.
#[derive(Debug, Clone)]
pub struct WebUntisProvider {
    rpc: RpcClient,
    client_name: String,
}

impl WebUntisProvider {
    pub fn new(
        server: &Url,
        school: &str,
        client_name: &str,
        timeout: Duration,
    ) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(client_name)
            .timeout(timeout)
            .build()
            .map_err(ProviderError::Transport)?;

        let mut endpoint = server.join("WebUntis/jsonrpc.do").map_err(|e| {
            TimetableError::InvalidConfigValueError {
                field: "SERVER".to_string(),
                value: server.to_string(),
                reason: e.to_string(),
            }
        })?;
        endpoint.query_pairs_mut().append_pair("school", school);

        Ok(Self {
            rpc: RpcClient::new(http, endpoint),
            client_name: client_name.to_string(),
        })
    }

    pub fn endpoint(&self) -> &Url {
        self.rpc.endpoint()
    }
}

#[async_trait]
impl TimetableProvider for WebUntisProvider {
    async fn login(&self, credentials: &Credentials) -> ProviderResult<Box<dyn ProviderSession>> {
        let params = json!({
            "user": credentials.username,
            "password": credentials.password,
            "client": self.client_name,
        });

        let auth: AuthResult = match self.rpc.call("authenticate", params, None).await {
            Ok(auth) => auth,
            Err(ProviderError::Rpc { message, code, .. }) => {
                return Err(ProviderError::Authentication {
                    message: format!("{} (code {})", message, code),
                })
            }
            Err(e) => return Err(e),
        };

        let session_id = auth
            .session_id
            .filter(|id| !id.is_empty())
            .ok_or_else(|| ProviderError::Authentication {
                message: "no session id in authenticate response".to_string(),
            })?;

        tracing::debug!("Authenticated as {}", credentials.username);
        Ok(Box::new(WebUntisSession {
            rpc: self.rpc.clone(),
            session_id,
        }))
    }
}

pub struct WebUntisSession {
    rpc: RpcClient,
    session_id: String,
}

impl WebUntisSession {
    async fn call<R: serde::de::DeserializeOwned>(
        &self,
        method: &str,
        params: serde_json::Value,
    ) -> ProviderResult<R> {
        self.rpc.call(method, params, Some(&self.session_id)).await
    }
}

/// WebUntis dates travel as `YYYYMMDD` integers.
pub fn pack_date(date: NaiveDate) -> i64 {
    i64::from(date.year()) * 10_000 + i64::from(date.month()) * 100 + i64::from(date.day())
}

#[async_trait]
impl ProviderSession for WebUntisSession {
    async fn classes(&self) -> ProviderResult<Vec<SchoolClass>> {
        self.call("getKlassen", json!({})).await
    }

    async fn subjects(&self) -> ProviderResult<Vec<Subject>> {
        self.call("getSubjects", json!({})).await
    }

    async fn teachers(&self) -> ProviderResult<Vec<Teacher>> {
        self.call("getTeachers", json!({})).await
    }

    async fn rooms(&self) -> ProviderResult<Vec<Room>> {
        self.call("getRooms", json!({})).await
    }

    async fn timetable(
        &self,
        class: &SchoolClass,
        week: &WeekRange,
    ) -> ProviderResult<Vec<RawPeriodEntry>> {
        let fields = ["id", "name", "longname"];
        let params = json!({
            "options": {
                "element": {"id": class.id, "type": ELEMENT_TYPE_CLASS},
                "startDate": pack_date(week.start),
                "endDate": pack_date(week.end),
                "showInfo": true,
                "showSubstText": true,
                "showLsText": true,
                "subjectFields": fields,
                "teacherFields": fields,
                "roomFields": fields,
            }
        });
        self.call("getTimetable", params).await
    }

    async fn logout(self: Box<Self>) -> ProviderResult<()> {
        let _: serde_json::Value = self.call("logout", json!({})).await?;
        tracing::debug!("Logged out of WebUntis session");
        Ok(())
    }
}
