use llmapi::providers::gemini::response_to_text_data;
use llmapi::{GenerationConfig, LLMClient, LLMMessage, LLMMessageType, chat, send_generate_request};
use serde_json::{Value, json};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const MODEL: &str = "gemini-2.5-flash-lite";

fn client_for(server: &MockServer) -> LLMClient {
    LLMClient::new("test-key", server.uri(), MODEL, GenerationConfig::default())
}

fn inspection_request() -> Vec<LLMMessage> {
    vec![LLMMessage::new(
        None,
        "Human",
        vec![
            LLMMessageType::text("Assume you are a structural engineer."),
            LLMMessageType::image_bytes(&[0x89, b'P', b'N', b'G'], "column.png"),
        ],
    )]
}

fn text_response(text: &str) -> Value {
    json!({
        "candidates": [{
            "content": { "role": "model", "parts": [{ "text": text }] },
            "finishReason": "STOP",
            "index": 0
        }],
        "modelVersion": MODEL,
        "responseId": "resp-1"
    })
}

#[tokio::test]
async fn generate_request_carries_prompt_image_and_sampling_params() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("/{MODEL}:generateContent")))
        .and(header("x-goog-api-key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(text_response("REPORT-X")))
        .expect(1)
        .mount(&server)
        .await;

    let response = send_generate_request(&client_for(&server), inspection_request())
        .await
        .expect("mocked call succeeds");
    assert_eq!(response_to_text_data(&response).unwrap(), "REPORT-X");

    let received = server.received_requests().await.expect("recording enabled");
    let body: Value = serde_json::from_slice(&received[0].body).unwrap();
    assert_eq!(body["generationConfig"]["temperature"], 0.7);
    assert_eq!(body["generationConfig"]["topK"], 0);

    let parts = &body["contents"][0]["parts"];
    assert_eq!(parts[0]["text"], "Assume you are a structural engineer.");
    assert_eq!(parts[1]["inlineData"]["mimeType"], "image/png");
    assert_eq!(parts[1]["inlineData"]["data"], "iVBORw==");
}

#[tokio::test]
async fn error_status_is_propagated_with_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(403).set_body_string("API key not valid"))
        .expect(1)
        .mount(&server)
        .await;

    let err = send_generate_request(&client_for(&server), inspection_request())
        .await
        .expect_err("403 must surface");
    let message = err.to_string();
    assert!(message.contains("403"), "{message}");
    assert!(message.contains("API key not valid"), "{message}");
}

#[tokio::test]
async fn undecodable_body_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>proxy</html>"))
        .mount(&server)
        .await;

    let result = send_generate_request(&client_for(&server), inspection_request()).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn chat_fn_returns_model_text_as_ai_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(text_response("No defects.")))
        .expect(1)
        .mount(&server)
        .await;

    let chat_fn = chat(client_for(&server));
    let reply = chat_fn(inspection_request()).await.expect("chat succeeds");

    assert_eq!(reply.id, "resp-1");
    assert_eq!(reply.role, llmapi::LLMUserType::AI);
    assert_eq!(reply.text_content(), "No defects.");
}

#[tokio::test]
async fn chat_fn_surfaces_server_errors() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let chat_fn = chat(client_for(&server));
    assert!(chat_fn(inspection_request()).await.is_err());
}
