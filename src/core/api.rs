// SPDX-License-Identifier: GPL-3.0-only

use std::{fmt::Debug, sync::Arc, time::Duration};

use anywho::{Error, anywho};
use rustemon::{
    client::{CacheMode, Environment, MokaManager, RustemonClient, RustemonClientBuilder},
    error::Error as RustemonError,
};

use crate::{
    core::lookup::{LookupError, LookupGateway, SpeciesSource, SpriteFetcher},
    entities::{LookupQuery, SpeciesEntry},
};

/// Gateway used by the application, backed by PokéApi for both stages
pub type DexGateway = LookupGateway<DexApi, DexApi>;

/// PokéApi access: species data through rustemon, sprites through a plain HTTP client
#[derive(Clone)]
pub struct DexApi {
    client: Arc<RustemonClient>,
    http: reqwest::Client,
    timeout: Duration,
}

impl Debug for DexApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DexApi")
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl DexApi {
    /// Creates the API clients, every request will be abandoned after `timeout`
    pub fn new(timeout: Duration) -> Result<Self, Error> {
        Self::with_environment(timeout, Environment::Production)
    }

    /// Same as [`DexApi::new`] but species data comes from another PokéApi deployment
    pub fn with_environment(timeout: Duration, environment: Environment) -> Result<Self, Error> {
        // Lookups always go to the network, nothing is kept between them
        let client = RustemonClientBuilder::default()
            .with_manager(MokaManager::default())
            .with_mode(CacheMode::NoStore)
            .with_environment(environment)
            .try_build()
            .map_err(|e| anywho!("Failed to build the PokéApi client: {e}"))?;

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .pool_max_idle_per_host(2)
            .build()?;

        Ok(Self {
            client: Arc::new(client),
            http,
            timeout,
        })
    }

    /// Builds the lookup gateway on top of this API
    pub fn into_gateway(self) -> DexGateway {
        LookupGateway::new(self.clone(), self)
    }
}

impl SpeciesSource for DexApi {
    async fn species(&self, query: &LookupQuery) -> Result<SpeciesEntry, LookupError> {
        let request = async {
            match query {
                LookupQuery::Id(id) => {
                    rustemon::pokemon::pokemon::get_by_id(i64::from(*id), &self.client).await
                }
                LookupQuery::Name(name) => {
                    rustemon::pokemon::pokemon::get_by_name(name, &self.client).await
                }
            }
        };

        let pokemon = match tokio::time::timeout(self.timeout, request).await {
            Ok(Ok(pokemon)) => pokemon,
            Ok(Err(e)) => return Err(classify_error(query, &e)),
            Err(_) => {
                return Err(LookupError::Unavailable(format!(
                    "PokéApi did not answer within {}s",
                    self.timeout.as_secs()
                )));
            }
        };

        let dex_number = u32::try_from(pokemon.id)
            .ok()
            .filter(|id| *id > 0)
            .ok_or_else(|| {
                LookupError::Unavailable(format!("PokéApi returned an invalid id: {}", pokemon.id))
            })?;

        Ok(SpeciesEntry {
            dex_number,
            name: pokemon.name,
            types: pokemon
                .types
                .iter()
                .map(|types| types.type_.name.to_string())
                .collect(),
            sprite_url: pokemon.sprites.front_default,
        })
    }
}

impl SpriteFetcher for DexApi {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, Error> {
        let response = self.http.get(url).send().await?;
        if response.status().is_success() {
            let bytes = response.bytes().await?;
            Ok(bytes.to_vec())
        } else {
            Err(anywho!(
                "Failed to download image. Status: {}",
                response.status()
            ))
        }
    }
}

/// Tells apart "PokéApi doesn't know this Pokémon" from "we couldn't talk to PokéApi".
///
/// PokéApi answers unknown resources with a 404 and a plain text body, rustemon reads every
/// body as JSON so that surfaces as a decode error. Failures to connect, send or read are
/// transport problems.
fn classify_error(query: &LookupQuery, err: &RustemonError) -> LookupError {
    let transport = match err {
        RustemonError::Reqwest(e) => {
            e.is_connect() || e.is_timeout() || e.is_request() || e.is_body()
        }
        RustemonError::ReqwestMiddleware(e) => {
            e.is_middleware() || e.is_connect() || e.is_timeout() || e.is_request() || e.is_body()
        }
        // the token doesn't make a valid resource path
        RustemonError::UrlParse(_) => false,
        _ => true,
    };

    if transport {
        tracing::warn!("PokéApi request for {query} failed: {err}");
        LookupError::Unavailable(err.to_string())
    } else {
        tracing::debug!("PokéApi has no entry for {query}: {err}");
        LookupError::NotFound(query.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::net::SocketAddr;
    use tokio::{
        io::{AsyncReadExt, AsyncWriteExt},
        net::TcpListener,
    };

    const NOT_FOUND: &str = "HTTP/1.1 404 Not Found\r\n\
        Content-Type: text/plain\r\n\
        Content-Length: 9\r\n\
        Connection: close\r\n\r\n\
        Not Found";

    /// Answers a single request with `response`
    async fn serve_once(response: &'static str) -> SocketAddr {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind local listener");
        let addr = listener.local_addr().expect("listener address");

        tokio::spawn(async move {
            if let Ok((mut stream, _)) = listener.accept().await {
                let mut request = [0u8; 4096];
                let _ = stream.read(&mut request).await;
                let _ = stream.write_all(response.as_bytes()).await;
                let _ = stream.shutdown().await;
            }
        });

        addr
    }

    fn local_api(addr: SocketAddr) -> DexApi {
        DexApi::with_environment(
            Duration::from_secs(5),
            Environment::Custom(format!("http://{addr}/api/v2/")),
        )
        .expect("clients should build")
    }

    #[tokio::test]
    async fn test_unknown_pokemon_is_not_found() {
        let api = local_api(serve_once(NOT_FOUND).await);

        let result = api
            .species(&LookupQuery::Name("notapokemon".to_string()))
            .await;
        assert_eq!(result, Err(LookupError::NotFound("notapokemon".to_string())));
    }

    #[tokio::test]
    async fn test_refused_connection_is_unavailable() {
        // grab a free port and close it again
        let addr = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind local port");
            listener.local_addr().expect("listener address")
        };
        let api = local_api(addr);

        let result = api.species(&LookupQuery::Name("pikachu".to_string())).await;
        assert!(
            matches!(result, Err(LookupError::Unavailable(_))),
            "got {result:?}"
        );

        let result = api.species(&LookupQuery::Id(25)).await;
        assert!(
            matches!(result, Err(LookupError::Unavailable(_))),
            "got {result:?}"
        );
    }

    #[tokio::test]
    async fn test_refused_connection_fails_the_lookup() {
        let addr = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind local port");
            listener.local_addr().expect("listener address")
        };

        let result = local_api(addr)
            .into_gateway()
            .resolve(&LookupQuery::Name("pikachu".to_string()), 120)
            .await;
        assert!(
            matches!(result, Err(LookupError::Unavailable(_))),
            "got {result:?}"
        );
    }

    #[tokio::test]
    async fn test_api_builds_gateway() {
        let api = DexApi::new(Duration::from_secs(5)).expect("clients should build");
        assert_eq!(api.timeout, Duration::from_secs(5));
        let _gateway: DexGateway = api.into_gateway();
    }
}
