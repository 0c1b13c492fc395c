use bytes::Bytes;
use http::{HeaderMap, HeaderName, HeaderValue, Method};

use crate::http_client::{
    request::{Request, RequestError, RequestHeaders, RequestMethod},
    response::Response,
};

impl From<&HeaderMap> for RequestHeaders {
    fn from(headers: &HeaderMap) -> Self {
        let map = headers
            .iter()
            .filter_map(|(k, v)| v.to_str().ok().map(|val| (k.to_string(), val.to_string())))
            .collect();
        RequestHeaders(map)
    }
}

impl From<HeaderMap> for RequestHeaders {
    fn from(headers: HeaderMap) -> Self {
        (&headers).into()
    }
}

impl From<RequestHeaders> for HeaderMap {
    fn from(h: RequestHeaders) -> Self {
        let mut header_map = HeaderMap::new();
        for (k, v) in h.iter() {
            if let (Ok(name), Ok(value)) = (
                HeaderName::from_bytes(k.as_bytes()),
                HeaderValue::from_str(v),
            ) {
                header_map.insert(name, value);
            }
        }
        header_map
    }
}

impl TryFrom<&Method> for RequestMethod {
    type Error = RequestError;

    fn try_from(value: &Method) -> Result<Self, Self::Error> {
        match *value {
            Method::GET => Ok(RequestMethod::Get),
            Method::POST => Ok(RequestMethod::Post),
            Method::PUT => Ok(RequestMethod::Put),
            Method::DELETE => Ok(RequestMethod::Delete),
            Method::PATCH => Ok(RequestMethod::Patch),
            _ => Err(RequestError::UnsupportedMethod(value.to_string())),
        }
    }
}

impl From<RequestMethod> for Method {
    fn from(value: RequestMethod) -> Self {
        match value {
            RequestMethod::Get => Method::GET,
            RequestMethod::Post => Method::POST,
            RequestMethod::Put => Method::PUT,
            RequestMethod::Delete => Method::DELETE,
            RequestMethod::Patch => Method::PATCH,
        }
    }
}

impl TryFrom<http::Request<Bytes>> for Request {
    type Error = RequestError;

    fn try_from(request: http::Request<Bytes>) -> Result<Self, Self::Error> {
        let (parts, body) = request.into_parts();

        Ok(Request {
            method: RequestMethod::try_from(&parts.method)?,
            url: parts.uri.to_string(),
            headers: (&parts.headers).into(),
            body,
        })
    }
}

impl From<http::Response<Bytes>> for Response {
    fn from(response: http::Response<Bytes>) -> Self {
        let (parts, body) = response.into_parts();

        Response {
            status: parts.status.as_u16(),
            headers: parts.headers.into(),
            body,
        }
    }
}

impl TryFrom<Response> for http::Response<Bytes> {
    type Error = http::Error;

    fn try_from(response: Response) -> Result<Self, Self::Error> {
        let mut builder = http::Response::builder().status(response.status);
        for (k, v) in response.headers.iter() {
            builder = builder.header(k.as_str(), v.as_str());
        }

        builder.body(response.body)
    }
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;
    use http::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode};

    use crate::http_client::{
        request::{Request, RequestError, RequestHeaders, RequestMethod},
        response::Response,
    };

    #[test]
    fn extracts_only_valid_headers_from_header_map() {
        let mut headers = HeaderMap::new();
        headers.insert(
            HeaderName::from_static("content-type"),
            HeaderValue::from_static("application/json"),
        );
        headers.insert(
            HeaderName::from_static("x-custom-header"),
            HeaderValue::from_static("custom-value"),
        );
        headers.insert(
            HeaderName::from_static("invalid-header"),
            HeaderValue::from_bytes(&[0xFF, 0xFE]).unwrap(),
        );

        let result_borrowed: RequestHeaders = (&headers).into();
        let result_owned: RequestHeaders = headers.into();

        assert_eq!(result_borrowed.0.len(), 2);
        assert_eq!(result_owned, result_borrowed);

        assert_eq!(
            result_borrowed.get("content-type"),
            Some(&"application/json".to_string())
        );
        assert_eq!(
            result_borrowed.get("x-custom-header"),
            Some(&"custom-value".to_string())
        );
        assert_eq!(result_borrowed.get("invalid-header"), None);
    }

    #[test]
    fn builds_header_map_from_valid_domain_headers() {
        let mut request_headers = RequestHeaders::default();
        request_headers.insert("content-type".to_string(), "application/json".to_string());
        request_headers.insert("bad header".to_string(), "dropped".to_string());

        let result: HeaderMap = request_headers.into();

        assert_eq!(result.len(), 1);
        assert_eq!(
            result.get("content-type"),
            Some(&HeaderValue::from_static("application/json"))
        );
    }

    #[test]
    fn converts_http_methods_into_domain_http_methods() {
        assert_eq!(RequestMethod::try_from(&Method::GET).unwrap(), RequestMethod::Get);
        assert_eq!(RequestMethod::try_from(&Method::POST).unwrap(), RequestMethod::Post);
        assert_eq!(RequestMethod::try_from(&Method::PUT).unwrap(), RequestMethod::Put);
        assert_eq!(
            RequestMethod::try_from(&Method::DELETE).unwrap(),
            RequestMethod::Delete
        );
        assert_eq!(
            RequestMethod::try_from(&Method::PATCH).unwrap(),
            RequestMethod::Patch
        );

        let err = RequestMethod::try_from(&Method::OPTIONS).unwrap_err();
        assert_eq!(err, RequestError::UnsupportedMethod("OPTIONS".to_string()));
    }

    #[test]
    fn converts_domain_http_methods_into_http_methods() {
        assert_eq!(Method::from(RequestMethod::Get), Method::GET);
        assert_eq!(Method::from(RequestMethod::Post), Method::POST);
        assert_eq!(Method::from(RequestMethod::Put), Method::PUT);
        assert_eq!(Method::from(RequestMethod::Delete), Method::DELETE);
        assert_eq!(Method::from(RequestMethod::Patch), Method::PATCH);
    }

    #[test]
    fn converts_http_request_into_domain_request() {
        let http_request = http::Request::builder()
            .method(Method::POST)
            .uri("http://bridge.local/run")
            .header("x-request-id", "42")
            .body(Bytes::from_static(b"{\"id\":42}"))
            .unwrap();

        let request = Request::try_from(http_request).unwrap();

        assert_eq!(request.method, RequestMethod::Post);
        assert_eq!(request.url, "http://bridge.local/run");
        assert_eq!(request.request_id(), Some("42"));
        assert_eq!(request.body, Bytes::from_static(b"{\"id\":42}"));
    }

    #[test]
    fn rejects_http_request_with_unsupported_method() {
        let http_request = http::Request::builder()
            .method(Method::HEAD)
            .uri("http://bridge.local/")
            .body(Bytes::new())
            .unwrap();

        let err = Request::try_from(http_request).unwrap_err();

        assert_eq!(err, RequestError::UnsupportedMethod("HEAD".to_string()));
    }

    #[test]
    fn converts_responses_both_ways() {
        let http_response = http::Response::builder()
            .status(StatusCode::ACCEPTED)
            .header("content-type", "text/plain")
            .body(Bytes::from_static(b"queued"))
            .unwrap();

        let response = Response::from(http_response);

        assert_eq!(response.status, 202);
        assert_eq!(
            response.headers.get("content-type"),
            Some(&"text/plain".to_string())
        );

        let back = http::Response::<Bytes>::try_from(response).unwrap();
        assert_eq!(back.status(), StatusCode::ACCEPTED);
        assert_eq!(back.body(), &Bytes::from_static(b"queued"));
    }

    #[test]
    fn rejects_response_with_out_of_range_status() {
        let response = Response {
            status: 42,
            headers: RequestHeaders::default(),
            body: Bytes::new(),
        };

        assert!(http::Response::<Bytes>::try_from(response).is_err());
    }
}
