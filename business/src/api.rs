//! CRUD contract of a resource endpoint.
//!
//! Listing is required; create, update and delete are optional capabilities.
//! The actions column offers edit only when [`CrudApi::update`] is set and
//! delete only when [`CrudApi::delete`] is set.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::record::{Record, RowId};
use crate::search::SearchParams;

/// Fallback notice texts per action.
pub const FETCH_FAILED: &str = "failed to fetch data";
pub const DELETE_FAILED: &str = "failed to delete";
pub const SAVE_FAILED: &str = "failed to save";
pub const REQUIRED_MISSING: &str = "required fields are empty";
pub const LOAD_FAILED: &str = "failed to load data";
pub const DELETED: &str = "deleted successfully";
pub const SAVED: &str = "saved successfully";

/// Envelope shared by every endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BaseResponse {
    #[serde(rename = "Ok")]
    pub ok: bool,
    #[serde(rename = "Msg", default, skip_serializing_if = "Option::is_none")]
    pub msg: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataResponse<T> {
    #[serde(rename = "Ok")]
    pub ok: bool,
    #[serde(rename = "Msg", default, skip_serializing_if = "Option::is_none")]
    pub msg: Option<String>,
    #[serde(rename = "Data", default = "Option::default", skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageResponse<T> {
    #[serde(rename = "Ok")]
    pub ok: bool,
    #[serde(rename = "Msg", default, skip_serializing_if = "Option::is_none")]
    pub msg: Option<String>,
    #[serde(rename = "Data", default = "Vec::new")]
    pub data: Vec<T>,
    #[serde(rename = "Count", default)]
    pub count: u64,
}

/// Rows of one page and the total number of matches.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub rows: Vec<Record>,
    pub count: u64,
}

#[derive(Debug, Error)]
pub enum ApiError {
    /// The server answered with `Ok: false`.
    #[error("{}", msg.as_deref().unwrap_or("request rejected"))]
    Rejected { msg: Option<String> },
    #[error("transport error: {0}")]
    Transport(String),
    #[error("unexpected status {status}")]
    Status { status: u16, msg: Option<String> },
    #[error("invalid response: {0}")]
    Decode(String),
}

impl ApiError {
    /// The server message if there is one, else `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::Rejected { msg: Some(msg) } | Self::Status { msg: Some(msg), .. }
                if !msg.is_empty() =>
            {
                msg.clone()
            }
            Self::Transport(message) | Self::Decode(message) if !message.is_empty() => {
                message.clone()
            }
            _ => fallback.to_owned(),
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

impl BaseResponse {
    pub fn into_result(self) -> ApiResult<()> {
        if self.ok {
            Ok(())
        } else {
            Err(ApiError::Rejected { msg: self.msg })
        }
    }
}

impl<T> DataResponse<T> {
    pub fn into_result(self) -> ApiResult<T> {
        if !self.ok {
            return Err(ApiError::Rejected { msg: self.msg });
        }
        self.data
            .ok_or_else(|| ApiError::Decode("missing Data".to_owned()))
    }
}

impl<T> PageResponse<T> {
    pub fn into_result(self) -> ApiResult<(Vec<T>, u64)> {
        if self.ok {
            Ok((self.data, self.count))
        } else {
            Err(ApiError::Rejected { msg: self.msg })
        }
    }
}

#[async_trait]
pub trait ListApi: Send + Sync {
    async fn get(&self, search: &SearchParams) -> ApiResult<Page>;

    async fn get_one(&self, id: RowId) -> ApiResult<Record>;
}

#[async_trait]
pub trait CreateApi: Send + Sync {
    async fn post(&self, data: &Record) -> ApiResult<()>;
}

#[async_trait]
pub trait UpdateApi: Send + Sync {
    async fn put(&self, id: RowId, data: &Record) -> ApiResult<()>;
}

#[async_trait]
pub trait DeleteApi: Send + Sync {
    async fn delete(&self, id: RowId) -> ApiResult<()>;
}

/// The capabilities one table works with.
#[derive(Clone)]
pub struct CrudApi {
    pub list: Arc<dyn ListApi>,
    pub create: Option<Arc<dyn CreateApi>>,
    pub update: Option<Arc<dyn UpdateApi>>,
    pub delete: Option<Arc<dyn DeleteApi>>,
}

impl std::fmt::Debug for CrudApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CrudApi")
            .field("create", &self.create.is_some())
            .field("update", &self.update.is_some())
            .field("delete", &self.delete.is_some())
            .finish_non_exhaustive()
    }
}

impl CrudApi {
    /// Read-only API.
    pub fn read_only(list: Arc<dyn ListApi>) -> Self {
        Self {
            list,
            create: None,
            update: None,
            delete: None,
        }
    }

    /// Every capability backed by the same implementation.
    pub fn full<A>(api: Arc<A>) -> Self
    where
        A: ListApi + CreateApi + UpdateApi + DeleteApi + 'static,
    {
        Self {
            list: api.clone(),
            create: Some(api.clone()),
            update: Some(api.clone()),
            delete: Some(api),
        }
    }

    pub fn can_create(&self) -> bool {
        self.create.is_some()
    }

    pub fn can_update(&self) -> bool {
        self.update.is_some()
    }

    pub fn can_delete(&self) -> bool {
        self.delete.is_some()
    }
}

/// Decode a `{Ok, Msg?, Data?, Count?}` body whose `Data` is a list of rows.
pub fn decode_page(body: &[u8]) -> ApiResult<Page> {
    let response: PageResponse<Record> =
        serde_json::from_slice(body).map_err(|err| ApiError::Decode(err.to_string()))?;
    let (rows, count) = response.into_result()?;
    Ok(Page { rows, count })
}

/// Decode a `{Ok, Msg?, Data}` body carrying one row.
pub fn decode_record(body: &[u8]) -> ApiResult<Record> {
    let response: DataResponse<Value> =
        serde_json::from_slice(body).map_err(|err| ApiError::Decode(err.to_string()))?;
    Record::try_from(response.into_result()?)
        .map_err(|other| ApiError::Decode(format!("expected an object, got {other}")))
}

/// Decode a bare `{Ok, Msg?}` acknowledgement.
pub fn decode_ack(body: &[u8]) -> ApiResult<()> {
    let response: BaseResponse =
        serde_json::from_slice(body).map_err(|err| ApiError::Decode(err.to_string()))?;
    response.into_result()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_envelope() {
        let page = decode_page(br#"{"Ok": true, "Data": [{"id": 1}, {"id": 2}], "Count": 12}"#)
            .expect("page");
        assert_eq!(page.rows.len(), 2);
        assert_eq!(page.count, 12);
    }

    #[test]
    fn page_without_data_is_empty() {
        let page = decode_page(br#"{"Ok": true}"#).expect("page");
        assert!(page.rows.is_empty());
        assert_eq!(page.count, 0);
    }

    #[test]
    fn rejected_envelope_keeps_message() {
        let err = decode_ack(br#"{"Ok": false, "Msg": "in use"}"#).expect_err("rejected");
        assert_eq!(err.user_message(DELETE_FAILED), "in use");
        assert_eq!(err.to_string(), "in use");
    }

    #[test]
    fn rejected_without_message_uses_fallback() {
        let err = decode_record(br#"{"Ok": false}"#).expect_err("rejected");
        assert_eq!(err.user_message(FETCH_FAILED), FETCH_FAILED);
    }

    #[test]
    fn record_must_be_object() {
        let err = decode_record(br#"{"Ok": true, "Data": [1]}"#).expect_err("not an object");
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[test]
    fn empty_transport_message_uses_fallback() {
        assert_eq!(ApiError::Transport(String::new()).user_message(SAVE_FAILED), SAVE_FAILED);
    }

    #[test]
    fn status_message_preferred() {
        let err = ApiError::Status {
            status: 500,
            msg: Some("db down".to_owned()),
        };
        assert_eq!(err.user_message(LOAD_FAILED), "db down");

        let err = ApiError::Status {
            status: 502,
            msg: None,
        };
        assert_eq!(err.user_message(LOAD_FAILED), LOAD_FAILED);
    }
}
