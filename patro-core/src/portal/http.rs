//! Minimal HTTP/1.x request parsing and response heads

use core::fmt::{self, Write};

use heapless::String;

/// Request method
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Method {
    Get,
    Head,
    Post,
    Other,
}

impl Method {
    fn parse(token: &str) -> Self {
        match token {
            "GET" => Method::Get,
            "HEAD" => Method::Head,
            "POST" => Method::Post,
            _ => Method::Other,
        }
    }
}

/// Request parsing errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RequestError {
    /// Nothing before the first line break
    Empty,
    /// Request line is not `METHOD TARGET VERSION`
    MalformedRequestLine,
    /// Version other than HTTP/1.x
    UnsupportedVersion,
}

/// Parsed request line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Request<'a> {
    pub method: Method,
    /// Path without the query string, always starting with `/`
    pub path: &'a str,
    /// Raw query string after `?`, if present
    pub query: Option<&'a str>,
}

impl<'a> Request<'a> {
    /// Parse the request line of a request head
    ///
    /// Only the first line is looked at; headers are ignored. Absolute-form
    /// targets (`http://host/path`) are reduced to their path.
    pub fn parse(head: &'a str) -> Result<Self, RequestError> {
        let line = head.lines().next().unwrap_or("").trim();
        if line.is_empty() {
            return Err(RequestError::Empty);
        }

        let mut parts = line.split_ascii_whitespace();
        let (Some(method), Some(target), Some(version), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(RequestError::MalformedRequestLine);
        };

        if !version.starts_with("HTTP/1.") {
            return Err(RequestError::UnsupportedVersion);
        }

        let target = strip_authority(target);
        let (path, query) = match target.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (target, None),
        };
        let path = if path.is_empty() { "/" } else { path };
        if !path.starts_with('/') {
            return Err(RequestError::MalformedRequestLine);
        }

        Ok(Self {
            method: Method::parse(method),
            path,
            query,
        })
    }

    /// Look up a query parameter
    pub fn param(&self, name: &str) -> Option<&'a str> {
        self.query.and_then(|query| query_param(query, name))
    }

    /// Whether the response should carry a body
    pub fn wants_body(&self) -> bool {
        self.method != Method::Head
    }
}

fn strip_authority(target: &str) -> &str {
    let Some(rest) = target
        .strip_prefix("http://")
        .or_else(|| target.strip_prefix("https://"))
    else {
        return target;
    };
    match rest.find(|c: char| c == '/' || c == '?') {
        Some(i) => &rest[i..],
        None => "/",
    }
}

/// Value of the first `name=value` pair in a query string
///
/// A bare `name` without `=` yields an empty value. No percent-decoding.
pub fn query_param<'a>(query: &'a str, name: &str) -> Option<&'a str> {
    query
        .split('&')
        .map(|pair| pair.split_once('=').unwrap_or((pair, "")))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value)
}

/// Response to send back
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Response {
    /// 200 with an HTML body
    Page(&'static str),
    /// 302 to the given location, no body
    Redirect(&'static str),
}

impl Response {
    pub fn status(&self) -> u16 {
        match self {
            Response::Page(_) => 200,
            Response::Redirect(_) => 302,
        }
    }

    pub fn reason(&self) -> &'static str {
        match self {
            Response::Page(_) => "OK",
            Response::Redirect(_) => "Found",
        }
    }

    /// Body bytes, empty for redirects
    pub fn body(&self) -> &'static str {
        match self {
            Response::Page(body) => body,
            Response::Redirect(_) => "",
        }
    }

    /// Write the status line and headers, including the blank line
    ///
    /// Fails only if `out` is too small.
    pub fn write_head<const N: usize>(&self, out: &mut String<N>) -> fmt::Result {
        write!(out, "HTTP/1.1 {} {}\r\n", self.status(), self.reason())?;
        match self {
            Response::Page(body) => {
                out.push_str("Content-Type: text/html; charset=utf-8\r\n")
                    .map_err(|_| fmt::Error)?;
                write!(out, "Content-Length: {}\r\n", body.len())?;
                out.push_str("Cache-Control: no-store\r\n")
                    .map_err(|_| fmt::Error)?;
            }
            Response::Redirect(location) => {
                write!(out, "Location: {}\r\n", location)?;
                out.push_str("Content-Length: 0\r\n")
                    .map_err(|_| fmt::Error)?;
            }
        }
        out.push_str("Connection: close\r\n\r\n")
            .map_err(|_| fmt::Error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple() {
        let request = Request::parse("GET / HTTP/1.1\r\nHost: 192.168.4.1\r\n\r\n").unwrap();
        assert_eq!(request.method, Method::Get);
        assert_eq!(request.path, "/");
        assert_eq!(request.query, None);
        assert!(request.wants_body());
    }

    #[test]
    fn test_parse_query() {
        let request = Request::parse("GET /set?red=1&green=2&blue=3 HTTP/1.1\r\n").unwrap();
        assert_eq!(request.path, "/set");
        assert_eq!(request.query, Some("red=1&green=2&blue=3"));
        assert_eq!(request.param("green"), Some("2"));
        assert_eq!(request.param("alpha"), None);
    }

    #[test]
    fn test_parse_absolute_target() {
        let request = Request::parse("GET http://example.com/set?red=1 HTTP/1.1\r\n").unwrap();
        assert_eq!(request.path, "/set");
        assert_eq!(request.query, Some("red=1"));

        let request = Request::parse("GET http://example.com HTTP/1.1\r\n").unwrap();
        assert_eq!(request.path, "/");
    }

    #[test]
    fn test_parse_head_method() {
        let request = Request::parse("HEAD / HTTP/1.0\r\n").unwrap();
        assert_eq!(request.method, Method::Head);
        assert!(!request.wants_body());
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(Request::parse(""), Err(RequestError::Empty));
        assert_eq!(Request::parse("\r\nHost: x\r\n"), Err(RequestError::Empty));
        assert_eq!(
            Request::parse("GET /\r\n"),
            Err(RequestError::MalformedRequestLine)
        );
        assert_eq!(
            Request::parse("GET / HTTP/1.1 extra\r\n"),
            Err(RequestError::MalformedRequestLine)
        );
        assert_eq!(
            Request::parse("GET * HTTP/1.1\r\n"),
            Err(RequestError::MalformedRequestLine)
        );
        assert_eq!(
            Request::parse("GET / HTTP/2\r\n"),
            Err(RequestError::UnsupportedVersion)
        );
    }

    #[test]
    fn test_query_param() {
        assert_eq!(query_param("a=1&b=2", "b"), Some("2"));
        assert_eq!(query_param("a=1&a=2", "a"), Some("1"));
        assert_eq!(query_param("flag&a=1", "flag"), Some(""));
        assert_eq!(query_param("", "a"), None);
    }

    #[test]
    fn test_redirect_head() {
        let mut head: String<128> = String::new();
        Response::Redirect("/").write_head(&mut head).unwrap();
        assert_eq!(
            head.as_str(),
            "HTTP/1.1 302 Found\r\nLocation: /\r\nContent-Length: 0\r\nConnection: close\r\n\r\n"
        );
        assert_eq!(Response::Redirect("/").body(), "");
    }

    #[test]
    fn test_page_head() {
        let mut head: String<192> = String::new();
        let response = Response::Page("<p>hi</p>");
        response.write_head(&mut head).unwrap();

        assert!(head.starts_with("HTTP/1.1 200 OK\r\n"));
        assert!(head.contains("Content-Type: text/html; charset=utf-8\r\n"));
        assert!(head.contains("Content-Length: 9\r\n"));
        assert!(head.ends_with("\r\n\r\n"));
        assert_eq!(response.body(), "<p>hi</p>");
    }

    #[test]
    fn test_head_overflow() {
        let mut head: String<16> = String::new();
        assert!(Response::Redirect("/").write_head(&mut head).is_err());
    }
}
