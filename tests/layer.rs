use std::convert::Infallible;

use galletta::config::PluginConfig;
use galletta::time::Duration;
use galletta::{CookieAttributes, CookiePlugin, RequestCookiesExt, ResponseCookiesExt, Secret};
use http::header::SET_COOKIE;
use http::{Request, Response};
use tower::{ServiceBuilder, ServiceExt};

fn plugin() -> CookiePlugin {
    CookiePlugin::new(PluginConfig::default().with_secret(Secret::new("tobiiscool").unwrap()))
}

fn set_cookies<B>(response: &Response<B>) -> Vec<String> {
    response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .map(|v| v.to_str().unwrap().to_owned())
        .collect()
}

#[tokio::test]
async fn handlers_see_parsed_cookies() {
    let service = ServiceBuilder::new()
        .layer(plugin().layer())
        .service_fn(|req: Request<()>| async move {
            let cookies = req.cookies().unwrap();
            let body = format!(
                "{}|{}|{}",
                cookies.get("foo").unwrap_or_default(),
                cookies.get("withSpace").unwrap_or_default(),
                cookies.len()
            );
            Ok::<_, Infallible>(Response::new(body))
        });

    let request = Request::builder()
        .header("cookie", "foo=bar; withSpace=a%20space")
        .body(())
        .unwrap();
    let response = service.oneshot(request).await.unwrap();
    assert_eq!(response.body(), "bar|a space|2");
}

#[tokio::test]
async fn requests_without_cookies_get_an_empty_map() {
    let service = ServiceBuilder::new()
        .layer(CookiePlugin::default().layer())
        .service_fn(|req: Request<()>| async move {
            Ok::<_, Infallible>(Response::new(req.cookies().map(|c| c.is_empty())))
        });

    let response = service.oneshot(Request::new(())).await.unwrap();
    assert_eq!(*response.body(), Some(true));
}

#[tokio::test]
async fn handlers_set_and_clear_cookies() {
    let service = ServiceBuilder::new()
        .layer(plugin().layer())
        .service_fn(|_req: Request<()>| async move {
            let mut response = Response::new(());
            response
                .set_cookie("foo", "bar", None)
                .unwrap()
                .set_cookie(
                    "b",
                    "2",
                    CookieAttributes::new()
                        .set_max_age(Duration::seconds(3600))
                        .set_http_only(true)
                        .set_secure(true),
                )
                .unwrap()
                .clear_cookie("old", None)
                .unwrap();
            Ok::<_, Infallible>(response)
        });

    let response = service.oneshot(Request::new(())).await.unwrap();
    assert_eq!(
        set_cookies(&response),
        [
            "foo=bar; Path=/",
            "b=2; Max-Age=3600; Path=/; HttpOnly; Secure",
            "old=; Path=/; Expires=Thu, 01 Jan 1970 00:00:00 GMT",
        ]
    );
}

#[tokio::test]
async fn signed_cookies_roundtrip_through_the_client() {
    let plugin = plugin();

    // First request: the handler issues a signed cookie.
    let issue = ServiceBuilder::new()
        .layer(plugin.layer())
        .service_fn(|req: Request<()>| async move {
            let signed = req.sign_cookie("hello").unwrap();
            let mut response = Response::new(());
            response.set_cookie("session", &signed, None).unwrap();
            Ok::<_, Infallible>(response)
        });
    let response = issue.oneshot(Request::new(())).await.unwrap();
    let set_cookie = set_cookies(&response).remove(0);
    assert_eq!(
        set_cookie,
        "session=hello.DGDUkGlIkCzPz%2BC0B064FNgHdEjox7ch8tOBGslZ5QI; Path=/"
    );

    // Second request: the client sends it back and the handler verifies it.
    let cookie_header = set_cookie.split(';').next().unwrap().to_owned();
    let verify = ServiceBuilder::new()
        .layer(plugin.layer())
        .service_fn(|req: Request<()>| async move {
            let raw = req.cookie("session").unwrap_or_default();
            Ok::<_, Infallible>(Response::new(req.unsign_cookie(raw).unwrap()))
        });

    let request = Request::builder()
        .header("cookie", &cookie_header)
        .body(())
        .unwrap();
    let response = verify.clone().oneshot(request).await.unwrap();
    assert_eq!(response.body().as_deref(), Some("hello"));

    let forged = Request::builder()
        .header("cookie", "session=hellp.DGDUkGlIkCzPz%2BC0B064FNgHdEjox7ch8tOBGslZ5QI")
        .body(())
        .unwrap();
    let response = verify.oneshot(forged).await.unwrap();
    assert_eq!(*response.body(), None);
}
