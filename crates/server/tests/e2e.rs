use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use reqwest::StatusCode as HttpStatusCode;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use uuid::Uuid;

use server::routes;
use service::cafes::{CafeRepository, CafeStore};

fn cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

struct TestApp {
    base_url: String,
}

async fn start_server() -> anyhow::Result<TestApp> {
    // Isolated store file per test run, seeded like the production data set
    let temp_id = Uuid::new_v4();
    let store_path = format!("target/test-data/{}/cafes.json", temp_id);
    if let Some(parent) = std::path::Path::new(&store_path).parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    let initial = json!([
        {"id": 1, "nombre": "Cortado"},
        {"id": 2, "nombre": "Americano"},
        {"id": 3, "nombre": "Capuccino"},
        {"id": 4, "nombre": "Mocca"}
    ]);
    tokio::fs::write(&store_path, serde_json::to_vec_pretty(&initial)?).await?;

    let repo: Arc<dyn CafeRepository> = CafeStore::new(&store_path);
    let app: Router = routes::build_router(repo, cors());

    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            eprintln!("server error: {}", e);
        }
    });

    Ok(TestApp { base_url })
}

fn client() -> reqwest::Client {
    reqwest::Client::new()
}

#[tokio::test]
async fn e2e_list_cafes() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = client().get(format!("{}/cafes", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<Value>().await?;
    let cafes = body.as_array().expect("array body");
    assert!(!cafes.is_empty());
    assert!(cafes[0].is_object());
    assert_eq!(cafes[0]["id"], json!(1));
    Ok(())
}

#[tokio::test]
async fn e2e_get_by_id() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();

    // path params are strings; the store's id 2 is numeric
    let res = c.get(format!("{}/cafes/2", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["nombre"], json!("Americano"));

    let res = c.get(format!("{}/cafes/9999", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    let body = res.json::<Value>().await?;
    assert_eq!(body["message"], json!("No se encontró ningún cafe con ese id"));
    Ok(())
}

#[tokio::test]
async fn e2e_create_cafe() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();

    let new_cafe = json!({"id": 5, "nombre": "Ristretto"});
    let res = c
        .post(format!("{}/cafes", app.base_url))
        .json(&new_cafe)
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);
    // the whole updated collection comes back, new record appended last
    let body = res.json::<Value>().await?;
    let cafes = body.as_array().expect("array body");
    assert_eq!(cafes.len(), 5);
    assert_eq!(cafes[4], new_cafe);

    // a later list sees the persisted record
    let res = c.get(format!("{}/cafes/5", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn e2e_create_duplicate_id_rejected() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();

    let res = c
        .post(format!("{}/cafes", app.base_url))
        .json(&json!({"id": 1, "nombre": "Doble"}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
    let body = res.json::<Value>().await?;
    assert_eq!(body["message"], json!("Ya existe un cafe con ese id"));

    // loose match: string "1" collides with the stored numeric 1 as well
    let res = c
        .post(format!("{}/cafes", app.base_url))
        .json(&json!({"id": "1", "nombre": "Doble"}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);

    // collection unchanged
    let res = c.get(format!("{}/cafes", app.base_url)).send().await?;
    let body = res.json::<Value>().await?;
    assert_eq!(body.as_array().expect("array body").len(), 4);
    Ok(())
}

#[tokio::test]
async fn e2e_create_without_id_rejected() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();

    let res = c
        .post(format!("{}/cafes", app.base_url))
        .json(&json!({"nombre": "Anonimo"}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
    let body = res.json::<Value>().await?;
    assert_eq!(body["message"], json!("El cafe debe tener un ID"));

    let res = c.get(format!("{}/cafes", app.base_url)).send().await?;
    let body = res.json::<Value>().await?;
    assert_eq!(body.as_array().expect("array body").len(), 4);
    Ok(())
}

#[tokio::test]
async fn e2e_update_cafe() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();

    let updated = json!({"id": 2, "nombre": "Flat White"});
    let res = c
        .put(format!("{}/cafes/2", app.base_url))
        .json(&updated)
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<Value>().await?;
    let cafes = body.as_array().expect("array body");
    // replaced in place, neighbors untouched
    assert_eq!(cafes[1], updated);
    assert_eq!(cafes[0]["nombre"], json!("Cortado"));
    assert_eq!(cafes.len(), 4);
    Ok(())
}

#[tokio::test]
async fn e2e_update_id_mismatch_rejected() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();

    let res = c
        .put(format!("{}/cafes/5", app.base_url))
        .json(&json!({"id": 7}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
    let body = res.json::<Value>().await?;
    assert_eq!(
        body["message"],
        json!("El id del parámetro no coincide con el id del café recibido")
    );

    // a body with no id at all fails the same comparison
    let res = c
        .put(format!("{}/cafes/5", app.base_url))
        .json(&json!({"nombre": "Sin Id"}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
    let body = res.json::<Value>().await?;
    assert_eq!(
        body["message"],
        json!("El id del parámetro no coincide con el id del café recibido")
    );
    Ok(())
}

#[tokio::test]
async fn e2e_update_missing_cafe_is_404() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = client()
        .put(format!("{}/cafes/9999", app.base_url))
        .json(&json!({"id": 9999, "nombre": "Fantasma"}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    let body = res.json::<Value>().await?;
    // this 404 text spells "café" with an accent, unlike get/delete
    assert_eq!(body["message"], json!("No se encontró ningún café con ese id"));
    Ok(())
}

#[tokio::test]
async fn e2e_delete_requires_authorization_header() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = client()
        .delete(format!("{}/cafes/1", app.base_url))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
    let body = res.json::<Value>().await?;
    assert_eq!(body["message"], json!("No recibió ningún token en las cabeceras"));
    Ok(())
}

#[tokio::test]
async fn e2e_delete_cafe_once() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();

    let res = c
        .delete(format!("{}/cafes/1", app.base_url))
        .header("Authorization", "Bearer some-valid-token")
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<Value>().await?;
    let cafes = body.as_array().expect("array body");
    assert_eq!(cafes.len(), 3);
    assert!(!cafes.iter().any(|c| c["id"] == json!(1)));

    // the record is gone, so the same delete now misses
    let res = c
        .delete(format!("{}/cafes/1", app.base_url))
        .header("Authorization", "Bearer some-valid-token")
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    let body = res.json::<Value>().await?;
    assert_eq!(body["message"], json!("No se encontró ningún cafe con ese id"));
    Ok(())
}

#[tokio::test]
async fn e2e_unknown_method_on_known_path_is_404() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();

    // PATCH is outside the surface even though the path exists
    let res = c
        .patch(format!("{}/cafes", app.base_url))
        .json(&json!({"id": 1}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    let body = res.json::<Value>().await?;
    assert_eq!(body["message"], json!("La ruta que intenta consultar no existe"));

    let res = c.post(format!("{}/cafes/1", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    let body = res.json::<Value>().await?;
    assert_eq!(body["message"], json!("La ruta que intenta consultar no existe"));
    Ok(())
}

#[tokio::test]
async fn e2e_unknown_route_is_404() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = client()
        .get(format!("{}/ruta/que/no/existe", app.base_url))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    let body = res.json::<Value>().await?;
    assert_eq!(body["message"], json!("La ruta que intenta consultar no existe"));
    Ok(())
}
