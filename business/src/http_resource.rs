//! REST implementation of the CRUD contract.

use async_trait::async_trait;
use ustr::Ustr;

use crate::BusinessConfig;
use crate::api::{
    ApiError, ApiResult, BaseResponse, CreateApi, DeleteApi, ListApi, Page, UpdateApi,
    decode_ack, decode_page, decode_record,
};
use crate::http::{Client, RequestBuilder, Response};
use crate::record::{Record, RowId};
use crate::search::SearchParams;

/// `{api_url}/{resource}` endpoints of one resource.
#[derive(Debug, Clone)]
pub struct HttpResource {
    api_url: Ustr,
    resource: Ustr,
    auth_token: Option<String>,
}

impl HttpResource {
    pub fn new(config: &BusinessConfig, resource: &str) -> Self {
        Self {
            api_url: config.api_url(),
            resource: Ustr::from(resource.trim_matches('/')),
            auth_token: config.auth_token().map(str::to_owned),
        }
    }

    pub fn resource(&self) -> Ustr {
        self.resource
    }

    fn collection_url(&self) -> String {
        format!("{}/{}", self.api_url, self.resource)
    }

    fn item_url(&self, id: RowId) -> String {
        format!("{}/{}/{id}", self.api_url, self.resource)
    }

    async fn send(&self, request: RequestBuilder) -> ApiResult<Response> {
        let response = request
            .bearer_auth(self.auth_token.as_deref())
            .send()
            .await
            .map_err(|err| ApiError::Transport(err.message))?;

        if response.is_success() {
            Ok(response)
        } else {
            let msg = response
                .json::<BaseResponse>()
                .ok()
                .and_then(|envelope| envelope.msg);
            log::warn!(
                "{} answered {} for {}",
                self.resource,
                response.status,
                msg.as_deref().unwrap_or("-")
            );
            Err(ApiError::Status {
                status: response.status,
                msg,
            })
        }
    }

    fn json_body(request: RequestBuilder, data: &Record) -> ApiResult<RequestBuilder> {
        request
            .json(data)
            .map_err(|err| ApiError::Decode(err.to_string()))
    }
}

#[async_trait]
impl ListApi for HttpResource {
    async fn get(&self, search: &SearchParams) -> ApiResult<Page> {
        let request = Client::get(self.collection_url()).query(search.to_query());
        let response = self.send(request).await?;
        decode_page(&response.body)
    }

    async fn get_one(&self, id: RowId) -> ApiResult<Record> {
        let response = self.send(Client::get(self.item_url(id))).await?;
        decode_record(&response.body)
    }
}

#[async_trait]
impl CreateApi for HttpResource {
    async fn post(&self, data: &Record) -> ApiResult<()> {
        let request = Self::json_body(Client::post(self.collection_url()), data)?;
        let response = self.send(request).await?;
        decode_ack(&response.body)
    }
}

#[async_trait]
impl UpdateApi for HttpResource {
    async fn put(&self, id: RowId, data: &Record) -> ApiResult<()> {
        let request = Self::json_body(Client::put(self.item_url(id)), data)?;
        let response = self.send(request).await?;
        decode_ack(&response.body)
    }
}

#[async_trait]
impl DeleteApi for HttpResource {
    async fn delete(&self, id: RowId) -> ApiResult<()> {
        let response = self.send(Client::delete(self.item_url(id))).await?;
        decode_ack(&response.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_join_api_and_resource() {
        let resource = HttpResource::new(&BusinessConfig::new("http://host:1/"), "/node/");
        assert_eq!(resource.collection_url(), "http://host:1/api/node");
        assert_eq!(resource.item_url(7), "http://host:1/api/node/7");
    }
}
