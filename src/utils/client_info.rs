//! Client IP, user agent and referer extraction from HTTP requests.

use axum::extract::connect_info::MockConnectInfo;
use axum::extract::{ConnectInfo, FromRequestParts};
use axum::http::{Extensions, HeaderMap, header, request::Parts};
use std::convert::Infallible;
use std::net::{IpAddr, SocketAddr};

use crate::domain::RequestContext;
use crate::state::AppState;

/// Proxy headers consulted, in order, when running behind a reverse proxy.
///
/// Multi-valued headers contribute their first (client-most) entry.
pub const PROXY_IP_HEADERS: [&str; 4] = [
    "x-vercel-forwarded-for",
    "x-forwarded-for",
    "cf-connecting-ip",
    "x-real-ip",
];

/// Resolves the client IP address.
///
/// With `behind_proxy` set, the first parseable address from
/// [`PROXY_IP_HEADERS`] wins. Otherwise, or when no header yields an address,
/// the socket peer address is used. Headers are ignored when not behind a
/// proxy because clients can set them freely.
pub fn client_ip(headers: &HeaderMap, peer: Option<IpAddr>, behind_proxy: bool) -> Option<IpAddr> {
    if behind_proxy {
        let forwarded = PROXY_IP_HEADERS.iter().find_map(|name| {
            headers
                .get(*name)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.split(',').next())
                .and_then(|first| first.trim().parse::<IpAddr>().ok())
        });

        if forwarded.is_some() {
            return forwarded;
        }
    }

    peer
}

/// Builds the [`RequestContext`] for a request.
pub fn request_context(
    headers: &HeaderMap,
    peer: Option<IpAddr>,
    behind_proxy: bool,
) -> RequestContext {
    let header_str = |name| headers.get(name).and_then(|v| v.to_str().ok());

    RequestContext::new(
        client_ip(headers, peer, behind_proxy).map(|ip| ip.to_string()),
        header_str(header::USER_AGENT),
        header_str(header::REFERER),
    )
}

/// Peer address recorded by `into_make_service_with_connect_info`, if any.
///
/// Falls back to [`MockConnectInfo`] like axum's `ConnectInfo` extractor.
pub fn peer_ip_from_extensions(extensions: &Extensions) -> Option<IpAddr> {
    extensions
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip())
        .or_else(|| {
            extensions
                .get::<MockConnectInfo<SocketAddr>>()
                .map(|MockConnectInfo(addr)| addr.ip())
        })
}

impl FromRequestParts<AppState> for RequestContext {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(request_context(
            &parts.headers,
            peer_ip_from_extensions(&parts.extensions),
            state.behind_proxy,
        ))
    }
}
