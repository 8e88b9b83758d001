//! HTTP server.
//!
//! Reads requests, finds the controller for the exact path, and writes the response.
//! Unknown paths get `404 - Not Found`. The CSP filter runs around every request.

use super::{Error, Request, Response, Router};
use crate::colors::MaybeColorize;
use crate::config::get_config;
use crate::view::CspFilter;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::io::{AsyncWriteExt, BufReader, BufWriter};
use tokio::net::{TcpListener, TcpStream};
use tokio::select;
use tokio::signal::ctrl_c;
use tracing::{debug, error, info};

/// HTTP server.
#[derive(Clone)]
pub struct Server {
    router: Arc<Router>,
    csp: Arc<CspFilter>,
}

impl Server {
    /// Create a server for the given routes.
    pub fn new(handlers: Vec<super::Handler>) -> Result<Self, Error> {
        Ok(Server {
            router: Arc::new(Router::new(handlers)?),
            csp: Arc::new(CspFilter::new(get_config().views.csp.clone())),
        })
    }

    /// Replace the CSP filter built from the configuration.
    pub fn with_csp(mut self, csp: CspFilter) -> Self {
        self.csp = Arc::new(csp);
        self
    }

    /// Listen on `general.host`:`general.port` until Ctrl-C.
    pub async fn launch(self) -> Result<(), Error> {
        let config = get_config();
        let addr = format!("{}:{}", config.general.host, config.general.port);
        self.launch_on(&addr).await
    }

    pub async fn launch_on(self, addr: &str) -> Result<(), Error> {
        let listener = TcpListener::bind(addr).await?;
        self.serve(listener).await
    }

    /// Accept connections from a bound listener until Ctrl-C.
    pub async fn serve(self, listener: TcpListener) -> Result<(), Error> {
        info!(
            "Starting {} {} {}",
            "viewkit".green(),
            "HTTP".purple(),
            "server".red()
        );

        self.router.log_routes();
        info!("Listening on {}", listener.local_addr()?);

        loop {
            select! {
                _ = ctrl_c() => {
                    info!("Shutting down...");
                    return Ok(());
                }

                result = listener.accept() => {
                    match result {
                        Ok((stream, peer)) => {
                            let server = self.clone();
                            tokio::spawn(async move {
                                server.handle_connection(stream, peer).await;
                            });
                        }

                        Err(err) => error!("accept: {}", err),
                    }
                }
            }
        }
    }

    async fn handle_connection(&self, stream: TcpStream, peer: SocketAddr) {
        let mut stream = BufReader::new(BufWriter::new(stream));
        debug!("{} new connection from {:?}", "http".purple(), peer);

        loop {
            let request = match Request::read(peer, &mut stream).await {
                Ok(request) => request,
                Err(err) => {
                    if let Error::HeadTooLarge(_) = err {
                        let response = Response::new().text(err.to_string()).code(err.code());
                        let _ = Self::send_response(&mut stream, &response).await;
                    }

                    debug!("{} client {:?} disconnected: {}", "http".purple(), peer, err);
                    return;
                }
            };

            let keep_alive = request.keep_alive();
            let response = self.handle(request).await;

            if let Err(err) = Self::send_response(&mut stream, &response).await {
                debug!("{} error {:?}", peer, err);
                return;
            }

            if !keep_alive {
                return;
            }
        }
    }

    /// Route one request and produce its response, with the CSP filter applied.
    pub async fn handle(&self, request: Request) -> Response {
        let start = Instant::now();
        let request = self.csp.prepare(request);

        let (controller_name, response) = match self.router.find(request.path()) {
            Some(handler) => (
                handler.controller_name(),
                handler.handle_internal(&request).await,
            ),
            None => (std::any::type_name::<Self>(), Response::not_found()),
        };

        let response = match self.csp.apply(&request, response) {
            Ok(response) => response,
            Err(err) => {
                error!("{}", err);
                Response::internal_error(err)
            }
        };

        Self::log(&request, controller_name, &response, start.elapsed());

        response
    }

    fn log(request: &Request, controller_name: &str, response: &Response, duration: Duration) {
        let method = request.method().to_string();
        let path = request.path().base();
        let code = response.status().code();
        let duration = (duration.as_secs_f64() * 1000.0) as f32;

        info!(
            "{} {} {} {} ({:.3} ms)",
            method.purple(),
            path.purple(),
            controller_name.green(),
            code,
            duration,
        );
    }

    async fn send_response(
        mut stream: impl tokio::io::AsyncWrite + Unpin,
        response: &Response,
    ) -> Result<(), Error> {
        response.send(&mut stream).await?;
        stream.flush().await?;

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::async_trait;
    use crate::config::Csp;
    use crate::controller::{Controller, Error as ControllerError};
    use tokio::io::AsyncReadExt;

    struct Hello;

    #[async_trait]
    impl Controller for Hello {
        async fn handle(&self, _request: &Request) -> Result<Response, ControllerError> {
            Ok(Response::new().html("<h1>hello</h1>"))
        }
    }

    #[tokio::test]
    async fn test_handle_not_found() {
        let server = Server::new(vec![Hello.route("/")]).expect("server");
        let response = server.handle(Request::get("/missing")).await;
        assert_eq!(response.status().code(), 404);
    }

    #[tokio::test]
    async fn test_csp_header() {
        let server = Server::new(vec![Hello.route("/")])
            .expect("server")
            .with_csp(CspFilter::new(Csp {
                enabled: true,
                policy_directives: Some("default-src 'self'".into()),
                ..Default::default()
            }));

        let response = server.handle(Request::get("/")).await;
        assert_eq!(
            response.headers().get("content-security-policy"),
            Some(&"default-src 'self'".to_string())
        );
    }

    #[tokio::test]
    async fn test_serve_over_tcp() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let server = Server::new(vec![Hello.route("/")]).expect("server");
        tokio::spawn(server.serve(listener));

        let mut client = TcpStream::connect(addr).await.unwrap();
        client
            .write_all(b"GET / HTTP/1.1\r\nConnection: close\r\n\r\n")
            .await
            .unwrap();

        let mut response = String::new();
        client.read_to_string(&mut response).await.unwrap();
        assert!(response.starts_with("HTTP/1.1 200 OK"));
        assert!(response.ends_with("<h1>hello</h1>"));
    }
}
