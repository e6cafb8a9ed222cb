// Workflow tests for draft scaffolding and publishing.
use camino::Utf8PathBuf;
use devpub::client::ApiClient;
use devpub::commands::article;
use devpub::config::Config;
use devpub::context::{AppContext, TestContext};
use devpub::host::{Document, Host, MemoryHost, Selection};
use mockito::Server;

fn workdir(ctx: &TestContext) -> Utf8PathBuf {
    Utf8PathBuf::from_path_buf(ctx.get_data_dir().unwrap()).unwrap()
}

fn doc(text: &str) -> Document {
    Document {
        path: None,
        text: text.to_string(),
        selections: vec![Selection::cursor(0)],
    }
}

// --- SCAFFOLDING ---

#[test]
fn test_create_article_appends_extension_and_inserts_template() {
    let ctx = TestContext::new();
    let dir = workdir(&ctx);
    let host = MemoryHost::new();
    host.push_prompt_reply(Some("my-post"));

    article::create_article(&host, &dir);

    let path = dir.join("my-post.md");
    assert!(path.exists(), "draft should be created with .md appended");
    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        article::ARTICLE_TEMPLATE
    );
    assert!(host.errors().is_empty());
}

#[test]
fn test_create_article_never_overwrites() {
    let ctx = TestContext::new();
    let dir = workdir(&ctx);
    let existing = dir.join("taken.md");
    std::fs::write(&existing, "precious").unwrap();

    let host = MemoryHost::new();
    host.push_prompt_reply(Some("taken.md"));
    article::create_article(&host, &dir);

    assert_eq!(std::fs::read_to_string(&existing).unwrap(), "precious");
    assert!(
        host.errors()
            .iter()
            .any(|e| e.contains("already exists")),
        "conflict must be reported"
    );
}

#[test]
fn test_create_article_cancelled_prompt_is_silent() {
    let ctx = TestContext::new();
    let dir = workdir(&ctx);
    let host = MemoryHost::new();
    host.push_prompt_reply(None);

    article::create_article(&host, &dir);

    assert!(host.errors().is_empty());
    assert!(std::fs::read_dir(&dir).unwrap().next().is_none());
}

#[test]
fn test_insert_template_replaces_selections_in_place() {
    let host = MemoryHost::new();
    host.set_active_document(Document {
        path: None,
        text: "some text is already here".to_string(),
        selections: vec![Selection::cursor(10)],
    });

    article::insert_template(&host);

    let text = host.active_document().unwrap().text;
    let expected = format!(
        "some text {}is already here",
        article::ARTICLE_TEMPLATE
    );
    assert_eq!(text, expected);
    assert_eq!(host.save_count(), 1, "document should be saved afterwards");
}

#[test]
fn test_insert_template_without_document_is_noop() {
    let host = MemoryHost::new();
    article::insert_template(&host);
    assert!(host.errors().is_empty());
    assert_eq!(host.save_count(), 0);
}

// --- PUBLISH VALIDATION ---

const VALID_DRAFT: &str = "---\ntitle = \"t\"\ndescription = \"d\"\npublished = false\ntags = \"a, b, c\"\n---\n\nHello body\n";

fn publish_setup(server: &Server) -> (TestContext, ApiClient) {
    let ctx = TestContext::new();
    let mut config = Config::default();
    config.api_key = "secret".to_string();
    config.save(&ctx).unwrap();
    let client = ApiClient::new(&server.url()).unwrap();
    (ctx, client)
}

#[tokio::test]
async fn test_publish_requires_open_document() {
    let server = Server::new_async().await;
    let (ctx, client) = publish_setup(&server);
    let host = MemoryHost::new();

    article::publish_article(&host, &ctx, &client).await;

    assert_eq!(
        host.errors(),
        vec!["You have to have the article open in order to publish it"]
    );
}

#[tokio::test]
async fn test_publish_requires_token() {
    let server = Server::new_async().await;
    let ctx = TestContext::new();
    let client = ApiClient::new(&server.url()).unwrap();
    let host = MemoryHost::new();
    host.set_active_document(doc(VALID_DRAFT));

    article::publish_article(&host, &ctx, &client).await;

    assert_eq!(host.errors(), vec!["You must provide a dev.to token"]);
}

#[tokio::test]
async fn test_publish_without_title_never_calls_remote() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/articles")
        .expect(0)
        .create_async()
        .await;
    let (ctx, client) = publish_setup(&server);

    let host = MemoryHost::new();
    host.set_active_document(doc("---\ndescription = \"d\"\n---\nbody"));

    article::publish_article(&host, &ctx, &client).await;

    assert_eq!(host.errors(), vec!["Title attribute is required"]);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_publish_rejects_more_than_four_tags() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/articles")
        .expect(0)
        .create_async()
        .await;
    let (ctx, client) = publish_setup(&server);

    let host = MemoryHost::new();
    host.set_active_document(doc(
        "---\ntitle = \"t\"\ntags = \"one, two, three, four, five\"\n---\nbody",
    ));

    article::publish_article(&host, &ctx, &client).await;

    assert_eq!(host.errors(), vec!["A maximum of 4 tags is supported"]);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_publish_parse_error_is_surfaced_verbatim() {
    let server = Server::new_async().await;
    let (ctx, client) = publish_setup(&server);

    let host = MemoryHost::new();
    host.set_active_document(doc("---\ntitle = broken\n---\nbody"));

    article::publish_article(&host, &ctx, &client).await;

    let errors = host.errors();
    assert_eq!(errors.len(), 1);
    assert!(host.opened_urls().is_empty());
}

// --- PUBLISH REQUEST & RESPONSE HANDLING ---

#[tokio::test]
async fn test_publish_sends_mapped_payload_and_opens_edit_url() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/articles")
        .match_header("api-key", "secret")
        .match_header("content-type", "application/json")
        .match_body(mockito::Matcher::PartialJson(serde_json::json!({
            "article": {
                "title": "t",
                "description": "d",
                "published": false,
                "tags": ["a", "b", "c"],
            }
        })))
        .with_status(201)
        .with_body(r#"{"url": "https://dev.to/user/t-123"}"#)
        .create_async()
        .await;
    let (ctx, client) = publish_setup(&server);

    let host = MemoryHost::new();
    host.set_active_document(doc(VALID_DRAFT));

    article::publish_article(&host, &ctx, &client).await;

    mock.assert_async().await;
    assert_eq!(
        host.infos(),
        vec!["Post has successfully been published to dev.to"]
    );
    // Draft is unpublished, so the edit-mode URL opens.
    assert_eq!(host.opened_urls(), vec!["https://dev.to/user/t-123/edit"]);
    assert!(host.errors().is_empty());
}

#[tokio::test]
async fn test_publish_published_draft_opens_canonical_url() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/articles")
        .with_status(201)
        .with_body(r#"{"url": "https://dev.to/user/t-123"}"#)
        .create_async()
        .await;
    let (ctx, client) = publish_setup(&server);

    let host = MemoryHost::new();
    host.set_active_document(doc(
        "---\ntitle = \"t\"\npublished = true\n---\nbody",
    ));

    article::publish_article(&host, &ctx, &client).await;

    assert_eq!(host.opened_urls(), vec!["https://dev.to/user/t-123"]);
}

#[tokio::test]
async fn test_publish_api_error_never_opens_url() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/articles")
        .with_status(422)
        .with_body(r#"{"error": "Validation failed", "status": 422}"#)
        .create_async()
        .await;
    let (ctx, client) = publish_setup(&server);

    let host = MemoryHost::new();
    host.set_active_document(doc(VALID_DRAFT));

    article::publish_article(&host, &ctx, &client).await;

    assert_eq!(host.errors(), vec!["Validation failed"]);
    assert!(host.infos().is_empty());
    assert!(host.opened_urls().is_empty());
}

#[tokio::test]
async fn test_publish_transport_failure_is_surfaced() {
    // Nothing is listening on this port.
    let ctx = TestContext::new();
    let mut config = Config::default();
    config.api_key = "secret".to_string();
    config.save(&ctx).unwrap();
    let client = ApiClient::new("http://127.0.0.1:9").unwrap();

    let host = MemoryHost::new();
    host.set_active_document(doc(VALID_DRAFT));

    article::publish_article(&host, &ctx, &client).await;

    assert_eq!(host.errors().len(), 1);
    assert!(host.opened_urls().is_empty());
}
