use std::fs;
use std::path::Path;

use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use byteorder::{LittleEndian, WriteBytesExt};
use serde_json::{Value, json};

use fem_gl_backend::app_state::AppState;
use fem_gl_backend::config::ServerConfig;
use fem_gl_backend::mesh::structured_hex_grid;
use fem_gl_backend::routes;

fn write_f64s(path: &Path, values: impl IntoIterator<Item = f64>) {
    let mut bytes = Vec::new();
    for v in values {
        bytes.write_f64::<LittleEndian>(v).unwrap();
    }
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, bytes).unwrap();
}

fn write_i32s(path: &Path, values: impl IntoIterator<Item = i32>) {
    let mut bytes = Vec::new();
    for v in values {
        bytes.write_i32::<LittleEndian>(v).unwrap();
    }
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, bytes).unwrap();
}

/// 2×2×2 的网格，两个时间步，节点 i 的温度为 offset + i
fn dataset() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    let (nodes, elements) = structured_hex_grid([2, 2, 2]);
    let object = dir.path().join("cube");
    write_f64s(&object.join("case.nodes.bin"), nodes.iter().flatten().copied());
    write_i32s(&object.join("case.dc3d8.bin"), elements.iter().flatten().copied());
    for (label, offset) in [("0.1", 0.0), ("0.2", 100.0)] {
        write_f64s(
            &object.join("fo").join(label).join("no").join("nt11.bin"),
            (0..nodes.len()).map(|i| offset + i as f64),
        );
    }
    write_f64s(
        &object.join("fo").join("0.1").join("no").join("short.bin"),
        [1.0, 2.0],
    );
    let broken = object.join("fo").join("0.1").join("no").join("broken.bin.gz");
    fs::write(&broken, b"not a gzip stream").unwrap();
    write_f64s(
        &object.join("fo").join("0.1").join("eo").join("s11.bin"),
        [0.0; 8],
    );
    dir
}

fn state(dir: &Path) -> web::Data<AppState> {
    let config = ServerConfig {
        mesh_dir: dir.to_path_buf(),
        ..ServerConfig::default()
    };
    web::Data::new(AppState::from_config(&config))
}

#[actix_web::test]
async fn browse_objects_and_timesteps() {
    let dir = dataset();
    let app = test::init_service(
        App::new()
            .app_data(state(dir.path()))
            .configure(routes::configure),
    )
    .await;

    let req = test::TestRequest::get().uri("/objects").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data_folders"], json!(["cube"]));

    let req = test::TestRequest::post()
        .uri("/objects/properties")
        .set_json(json!({ "object_name": "cube" }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(
        body["object_properties"],
        json!(["wireframe", "broken", "nt11", "short"])
    );
    assert_eq!(body["element_properties"], json!(["s11"]));
    assert_eq!(body["initial_timestep"], json!("0.1"));

    let req = test::TestRequest::post()
        .uri("/objects/timesteps/after")
        .set_json(json!({ "object_name": "cube", "current_timestep": "0.1" }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["next_timestep"], json!("0.2"));

    let req = test::TestRequest::post()
        .uri("/objects/timesteps/before")
        .set_json(json!({ "object_name": "cube", "current_timestep": "0.1" }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["previous_timestep"], json!("0.1"));

    let req = test::TestRequest::post()
        .uri("/objects/timesteps")
        .set_json(json!({ "object_name": "../cube" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn mesh_then_timestep_data() {
    let dir = dataset();
    let data = state(dir.path());
    let app = test::init_service(
        App::new()
            .app_data(data.clone())
            .configure(routes::configure),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/mesher_init")
        .set_json(json!({
            "nodepath": "cube/case.nodes.bin",
            "elementpath": "cube/case.dc3d8.bin",
        }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let mesh_id = body["mesh_id"].as_str().unwrap().to_string();
    assert_eq!(body["surface_nodes"].as_array().unwrap().len(), 26 * 3);
    assert_eq!(body["surface_indexfile"].as_array().unwrap().len(), 48 * 3);
    assert_eq!(body["surface_metadata"], json!([1.0, 1.0, 1.0]));
    assert_eq!(body["rule"], json!("occurrence_weight"));
    assert_eq!(body["stats"]["boundary_faces"], json!(24));
    assert_eq!(data.mesh_store.len(), 1);

    let req = test::TestRequest::post()
        .uri("/timestep_data")
        .set_json(json!({
            "mesh_id": &mesh_id,
            "object_name": "cube",
            "field": "nt11",
            "timestep": "0.2",
        }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let scalars = body["timestep_data"].as_array().unwrap();
    assert_eq!(scalars.len(), 26);
    assert_eq!(scalars[0], json!(100.0));
    assert_eq!(body["colors"].as_array().unwrap().len(), 26 * 3);
    assert_eq!(body["range"], json!({ "min": 100.0, "max": 126.0 }));

    let req = test::TestRequest::post()
        .uri("/timestep_series")
        .set_json(json!({
            "mesh_id": &mesh_id,
            "object_name": "cube",
            "field": "nt11",
            "palette": "thermal",
        }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["timesteps"], json!(["0.1", "0.2"]));
    assert_eq!(body["range"], json!({ "min": 0.0, "max": 126.0 }));
    assert_eq!(body["colors"].as_array().unwrap().len(), 2);

    let req = test::TestRequest::get()
        .uri(&format!("/mesh/export?mesh_id={}&part=indices", mesh_id))
        .to_request();
    let text = test::call_and_read_body(&app, req).await;
    let text = std::str::from_utf8(&text).unwrap();
    assert_eq!(text.split(',').count(), 48 * 3);
    assert!(!text.ends_with(','));
}

#[actix_web::test]
async fn error_statuses() {
    let dir = dataset();
    let data = state(dir.path());
    let app = test::init_service(
        App::new()
            .app_data(data.clone())
            .configure(routes::configure),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/mesher_init")
        .set_json(json!({
            "nodepath": "cube/missing.bin",
            "elementpath": "cube/case.dc3d8.bin",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // 把单元文件当作节点文件：32 字节的倍数未必是 24 的倍数
    let req = test::TestRequest::post()
        .uri("/mesher_init")
        .set_json(json!({
            "nodepath": "cube/case.dc3d8.bin",
            "elementpath": "cube/case.dc3d8.bin",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    // 失败的初始化不会留下任何缓存
    assert!(data.mesh_store.is_empty());

    let req = test::TestRequest::post()
        .uri("/timestep_data")
        .set_json(json!({
            "mesh_id": "not-a-mesh",
            "object_name": "cube",
            "field": "nt11",
            "timestep": "0.1",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::post()
        .uri("/mesher_init")
        .set_json(json!({
            "nodepath": "cube/case.nodes.bin",
            "elementpath": "cube/case.dc3d8.bin",
            "rule": "shared_face",
        }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let mesh_id = body["mesh_id"].as_str().unwrap().to_string();
    assert_eq!(body["stats"]["boundary_faces"], json!(24));
    assert_eq!(body["rule"], json!("shared_face"));
    assert_eq!(data.mesh_store.len(), 1);

    let req = test::TestRequest::post()
        .uri("/timestep_data")
        .set_json(json!({
            "mesh_id": &mesh_id,
            "object_name": "cube",
            "field": "short",
            "timestep": "0.1",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    // 损坏的 gzip 文件存在但无法解压，不是 404
    let req = test::TestRequest::post()
        .uri("/timestep_data")
        .set_json(json!({
            "mesh_id": &mesh_id,
            "object_name": "cube",
            "field": "broken",
            "timestep": "0.1",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    // 下界大于上界的颜色范围
    let req = test::TestRequest::post()
        .uri("/timestep_data")
        .set_json(json!({
            "mesh_id": &mesh_id,
            "object_name": "cube",
            "field": "nt11",
            "timestep": "0.1",
            "range": { "min": 100.0, "max": 0.0 },
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::post()
        .uri("/timestep_data")
        .set_json(json!({
            "mesh_id": &mesh_id,
            "object_name": "cube",
            "field": "nt11",
            "timestep": "0.1",
            "range": { "min": 0.0, "max": 26.0 },
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(data.mesh_store.len(), 1);
}

#[actix_web::test]
async fn hello_lists_endpoints() {
    let dir = dataset();
    let app = test::init_service(
        App::new()
            .app_data(state(dir.path()))
            .configure(routes::configure),
    )
    .await;

    let req = test::TestRequest::get().uri("/").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["cached_meshes"], json!(0));
    assert_eq!(body["supported_extensions"], json!(["bin", "gz"]));
}
