use crate::api::handlers::cors_methods;
use crate::api::openapi::ApiDoc;
use utoipa::OpenApi;

const HTTP_VERBS: [&str; 8] = [
    "get", "post", "put", "patch", "delete", "head", "options", "trace",
];

#[test]
fn cors_allow_list_covers_every_documented_route() {
    let doc = serde_json::to_value(ApiDoc::openapi()).unwrap();
    let allowed: Vec<String> = cors_methods()
        .iter()
        .map(|m| m.as_str().to_ascii_lowercase())
        .collect();

    let paths = doc["paths"].as_object().unwrap();
    assert!(paths.contains_key("/api/split-bills/{bill_id}/mark-paid"));
    assert!(paths.contains_key("/api/split-bills/{bill_id}/reject"));

    for (path, item) in paths {
        for verb in item.as_object().unwrap().keys() {
            if HTTP_VERBS.contains(&verb.as_str()) {
                assert!(
                    allowed.contains(verb),
                    "{} {} is missing from the CORS allow list",
                    verb,
                    path
                );
            }
        }
    }
}
