//! Full person lifecycle against a live SOAP server.
//!
//! Starts the server on a random port backed by in-memory SQLite, then drives
//! every client operation over real HTTP with ureq.

use std::sync::Arc;

use person_core::{ApiError, HttpRequest, HttpResponse, NewPerson, Person, PersonClient};
use soap_server::{AppState, SqlitePersonRepository};

/// POST an `HttpRequest` with ureq, returning 4xx/5xx as data so the core
/// client interprets the status itself.
fn execute(req: HttpRequest) -> HttpResponse {
    let agent = ureq::Agent::config_builder()
        .http_status_as_error(false)
        .build()
        .new_agent();

    let mut request = agent.post(&req.url);
    for (name, value) in &req.headers {
        request = request.header(name, value);
    }
    let mut response = request
        .send(req.body.as_bytes())
        .expect("HTTP transport error");

    let status = response.status().as_u16();
    let body = response.body_mut().read_to_string().unwrap_or_default();

    HttpResponse {
        status,
        headers: Vec::new(),
        body,
    }
}

fn start_server() -> String {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let repo = SqlitePersonRepository::open_in_memory().unwrap();
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            soap_server::run(listener, AppState::new(Arc::new(repo))).await
        })
        .unwrap();
    });

    format!("http://{addr}")
}

fn new_person(name: &str, email: &str) -> NewPerson {
    NewPerson {
        name: name.to_string(),
        surname: "Lee".to_string(),
        age: 30,
        email: email.to_string(),
        telephone: "123".to_string(),
    }
}

#[test]
fn crud_lifecycle() {
    let client = PersonClient::new(&start_server());

    // Step 1: empty store lists nothing.
    let persons = client
        .parse_get_all_persons(execute(client.build_get_all_persons().unwrap()))
        .unwrap();
    assert!(persons.is_empty(), "expected empty list");

    // Step 2: add.
    let req = client.build_add_person(&new_person("Ann", "ann@x.com")).unwrap();
    let id = client.parse_add_person(execute(req)).unwrap();
    assert_eq!(id, 1);

    // Step 3: duplicate email is a conflict.
    let req = client.build_add_person(&new_person("Impostor", "ann@x.com")).unwrap();
    let err = client.parse_add_person(execute(req)).unwrap_err();
    assert!(matches!(err, ApiError::Conflict(_)));

    // Step 4: get.
    let fetched = client
        .parse_get_person(execute(client.build_get_person(id).unwrap()))
        .unwrap();
    assert_eq!(
        fetched,
        Person {
            id,
            name: "Ann".to_string(),
            surname: "Lee".to_string(),
            age: 30,
            email: "ann@x.com".to_string(),
            telephone: "123".to_string(),
        }
    );

    // Step 5: update every field.
    let changed = Person {
        name: "Annie".to_string(),
        age: 31,
        email: "annie@x.com".to_string(),
        ..fetched
    };
    let req = client.build_update_person(&changed).unwrap();
    assert!(client.parse_update_person(execute(req)).unwrap());
    let fetched = client
        .parse_get_person(execute(client.build_get_person(id).unwrap()))
        .unwrap();
    assert_eq!(fetched, changed);

    // Step 6: search hits and misses.
    let hits = client
        .parse_search_person(execute(client.build_search_person("annie").unwrap()))
        .unwrap();
    assert_eq!(hits, vec![changed]);
    let misses = client
        .parse_search_person(execute(client.build_search_person("zed").unwrap()))
        .unwrap();
    assert!(misses.is_empty());

    // Step 7: delete.
    let req = client.build_delete_person(id).unwrap();
    assert!(client.parse_delete_person(execute(req)).unwrap());

    // Step 8: get and delete after delete are NotFound.
    let err = client
        .parse_get_person(execute(client.build_get_person(id).unwrap()))
        .unwrap_err();
    assert!(matches!(err, ApiError::NotFound));
    let err = client
        .parse_delete_person(execute(client.build_delete_person(id).unwrap()))
        .unwrap_err();
    assert!(matches!(err, ApiError::NotFound));

    // Step 9: list is empty again.
    let persons = client
        .parse_get_all_persons(execute(client.build_get_all_persons().unwrap()))
        .unwrap();
    assert!(persons.is_empty(), "expected empty list after delete");
}
