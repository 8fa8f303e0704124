use super::*;

#[test]
fn url_joins_base_and_path() {
    let request = ApiRequest::get("/datasets");
    assert_eq!(request.url("/api/v1"), "/api/v1/datasets");
    assert_eq!(request.url("https://stats.example.org/api/v1/"), "https://stats.example.org/api/v1/datasets");
}

#[test]
fn path_without_leading_slash_is_normalized() {
    let request = ApiRequest::get("quality/scan/d1");
    assert_eq!(request.path, "/quality/scan/d1");
}

#[test]
fn query_pairs_keep_order() {
    let request = ApiRequest::get("/datasets/d1").query("page", 2).query("limit", 50);
    assert_eq!(
        request.query,
        vec![("page".to_owned(), "2".to_owned()), ("limit".to_owned(), "50".to_owned())]
    );
}

#[test]
fn json_body_is_serialized() {
    let request = ApiRequest::post("/wizard/recommend")
        .json(&serde_json::json!({ "dataset_id": "d1" }))
        .unwrap();
    assert_eq!(request.method, Method::Post);
    assert_eq!(request.body, Body::Json(serde_json::json!({ "dataset_id": "d1" })));
    assert_eq!(request.expect, Expect::Json);
}

#[test]
fn binary_marks_download() {
    let request = ApiRequest::get("/analysis/report/a1/pdf").binary();
    assert_eq!(request.expect, Expect::Binary);
    assert_eq!(request.body, Body::Empty);
}

#[test]
fn multipart_replaces_body() {
    let part = FormPart::File {
        name: "file".to_owned(),
        file: FilePart {
            filename: "trial.csv".to_owned(),
            content_type: "text/csv".to_owned(),
            bytes: b"a,b\n1,2\n".to_vec(),
        },
    };
    let request = ApiRequest::post("/datasets").multipart(vec![part.clone()]);
    assert_eq!(request.body, Body::Multipart(vec![part]));
}

#[test]
fn method_names_are_uppercase() {
    assert_eq!(Method::Get.as_str(), "GET");
    assert_eq!(Method::Put.as_str(), "PUT");
    assert_eq!(Method::Delete.as_str(), "DELETE");
}

#[test]
fn segment_escapes_reserved_and_non_ascii() {
    assert_eq!(segment("d1-a_b.c~"), "d1-a_b.c~");
    assert_eq!(segment("../admin"), "..%2Fadmin");
    assert_eq!(segment("q?x=1#top"), "q%3Fx%3D1%23top");
    assert_eq!(segment("é"), "%C3%A9");
}
