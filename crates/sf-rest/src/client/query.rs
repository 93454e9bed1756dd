use dynforce_client::{Context, QueryResult, DATA_PATH_PREFIX};
use tracing::{debug, instrument};

use crate::error::Result;
use crate::sobject::SObject;

impl super::SalesforceRestClient {
    /// Execute a SOQL query, or fetch the next page of a previous one.
    ///
    /// `input` is either a SOQL statement or the `next_records_url` of an
    /// earlier page. Only one page is fetched per call: loop until
    /// [`QueryResult::done`] to drain a large result set.
    ///
    /// On a [`tooling`](Self::tooling) client the statement is sent to the
    /// Tooling API query endpoint.
    ///
    /// Every returned record is bound to this client.
    ///
    /// # Security
    ///
    /// **IMPORTANT**: values interpolated into a SOQL statement must be
    /// escaped by the caller; this method sends the statement as-is.
    #[instrument(skip(self, ctx), fields(tooling = self.is_tooling()))]
    pub async fn query(&self, ctx: &Context, input: &str) -> Result<QueryResult<SObject>> {
        self.ensure_authenticated()?;

        let url = if input.starts_with(DATA_PATH_PREFIX) {
            self.client.url(input)
        } else {
            self.client.query_url(input)
        };

        let page: QueryResult<SObject> = self.client.get_json(ctx, &url).await?;
        debug!(
            total_size = page.total_size,
            done = page.done,
            records = page.records.len(),
            "Query page received"
        );

        Ok(page.map_records(|mut record| {
            record.bind(self);
            record
        }))
    }
}

#[cfg(test)]
mod tests {
    use crate::error::ErrorKind;
    use crate::SalesforceRestClient;
    use dynforce_client::Context;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn case(id: &str, subject: &str) -> serde_json::Value {
        json!({
            "attributes": {"type": "Case", "url": format!("/services/data/v54.0/sobjects/Case/{id}")},
            "Id": id,
            "Subject": subject
        })
    }

    #[tokio::test]
    async fn test_query_single_page() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/services/data/v54.0/query"))
            .and(query_param("q", "SELECT Id, Subject FROM Case"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "totalSize": 1,
                "done": true,
                "records": [case("500xx0000001", "First")]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = SalesforceRestClient::new(mock_server.uri(), "token").unwrap();
        let page = client
            .query(&Context::background(), "SELECT Id, Subject FROM Case")
            .await
            .unwrap();

        assert!(page.done);
        assert_eq!(page.total_size, 1);
        assert!(page.next_records_url.is_none());
        let record = &page.records[0];
        assert_eq!(record.sobject_type(), "Case");
        assert_eq!(record.string_field("Subject"), "First");
        assert!(record.is_live());
    }

    #[tokio::test]
    async fn test_query_pagination() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/services/data/v54.0/query"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "totalSize": 3,
                "done": false,
                "nextRecordsUrl": "/services/data/v54.0/query/01gxx000000NEXT-2000",
                "records": [case("500xx0000001", "One"), case("500xx0000002", "Two")]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        Mock::given(method("GET"))
            .and(path("/services/data/v54.0/query/01gxx000000NEXT-2000"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "totalSize": 3,
                "done": true,
                "records": [case("500xx0000003", "Three")]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = SalesforceRestClient::new(mock_server.uri(), "token").unwrap();
        let ctx = Context::background();

        let first = client.query(&ctx, "SELECT Id FROM Case").await.unwrap();
        assert!(!first.done);
        let next = first.next_records_url.as_deref().unwrap();
        assert!(!next.is_empty());

        let second = client.query(&ctx, next).await.unwrap();
        assert!(second.done);

        let ids: Vec<_> = first
            .records
            .iter()
            .chain(second.records.iter())
            .filter_map(|r| r.id())
            .collect();
        assert_eq!(ids, vec!["500xx0000001", "500xx0000002", "500xx0000003"]);
    }

    #[tokio::test]
    async fn test_tooling_query_endpoint() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/services/data/v54.0/tooling/query"))
            .and(query_param("q", "SELECT Id FROM ApexClass"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "totalSize": 0,
                "done": true,
                "records": []
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = SalesforceRestClient::new(mock_server.uri(), "token").unwrap();
        let page = client
            .tooling()
            .query(&Context::background(), "SELECT Id FROM ApexClass")
            .await
            .unwrap();
        assert!(page.records.is_empty());
    }

    #[tokio::test]
    async fn test_query_error_is_unified() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/services/data/v54.0/query"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!([{
                "message": "unexpected token: FORM",
                "errorCode": "MALFORMED_QUERY"
            }])))
            .mount(&mock_server)
            .await;

        let client = SalesforceRestClient::new(mock_server.uri(), "token").unwrap();
        let err = client
            .query(&Context::background(), "SELECT Id FORM Case")
            .await
            .unwrap_err();

        let fault = err.salesforce_error().unwrap();
        assert_eq!(fault.error_code(), "MALFORMED_QUERY");
        assert_eq!(fault.http_status(), 400);
    }

    #[tokio::test]
    async fn test_query_without_session_fails_locally() {
        let mock_server = MockServer::start().await;
        Mock::given(wiremock::matchers::any())
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&mock_server)
            .await;

        let client = SalesforceRestClient::new(mock_server.uri(), "").unwrap();
        let err = client
            .query(&Context::background(), "SELECT Id FROM Case")
            .await
            .unwrap_err();
        assert!(matches!(err.kind, ErrorKind::NotAuthenticated));
    }

    #[tokio::test]
    async fn test_query_cancelled() {
        let mock_server = MockServer::start().await;
        Mock::given(wiremock::matchers::any())
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&mock_server)
            .await;

        let client = SalesforceRestClient::new(mock_server.uri(), "token").unwrap();
        let (ctx, cancel) = Context::cancellable();
        cancel.cancel();

        let err = client.query(&ctx, "SELECT Id FROM Case").await.unwrap_err();
        assert!(err.is_cancelled());
        assert!(matches!(err.kind, ErrorKind::Transport(_)));
    }
}
