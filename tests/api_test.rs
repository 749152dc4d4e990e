mod common;

use chrono::NaiveDate;
use helpdesk_cli::{
    api::{ApiClient, ApiError},
    types::{Ticket, TicketPriority, TicketStatistics, TicketStatus},
};

use common::{BASE_URL, ScriptedTransport, service};

const TICKET_STATS: &str = r#"{"total": 10, "open": 4, "inProgress": 2, "resolved": 3, "closed": 1, "overdue": 2}"#;
const CLIENT_STATS: &str = r#"{"total": 7, "active": 6, "newThisMonth": 1}"#;
const TECHNICIAN_STATS: &str = r#"{"total": 3, "active": 3, "available": 1, "averageWorkload": 2.5}"#;
const APPOINTMENT_STATS: &str = r#"{"total": 5, "scheduled": 2, "completed": 2, "cancelled": 1, "upcoming": 2}"#;

fn at(y: i32, m: u32, d: u32) -> chrono::NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}

fn ticket(status: TicketStatus, due: Option<chrono::NaiveDateTime>, flag: Option<bool>) -> Ticket {
    Ticket {
        id: 1,
        title: "Printer on fire".to_string(),
        description: None,
        status,
        priority: TicketPriority::High,
        client_id: Some(3),
        technician_id: None,
        required_skill: None,
        created_at: None,
        due_date: due,
        overdue: flag,
    }
}

#[test]
fn test_get_decodes_payload_with_status_and_headers() {
    let transport = ScriptedTransport::new().respond(200, TICKET_STATS);
    let client = ApiClient::with_transport(BASE_URL, transport.clone());

    let response = client
        .get::<TicketStatistics>("/api/statistics/tickets")
        .unwrap();

    assert!(response.is_successful());
    assert_eq!(response.status, 200);
    assert!(response.headers.contains_key("content-type"));
    assert_eq!(response.data.total, 10);
    assert_eq!(response.data.in_progress, 2);
    assert_eq!(
        transport.calls(),
        vec![format!("{}/api/statistics/tickets", BASE_URL)]
    );
}

#[test]
fn test_non_success_status_becomes_http_error() {
    let transport = ScriptedTransport::new().respond(404, "ticket 99 not found");
    let client = ApiClient::with_transport(BASE_URL, transport);

    let err = client.get::<Ticket>("/api/tickets/99").unwrap_err();

    assert_eq!(err.status(), Some(404));
    assert!(!err.is_network());
    match err {
        ApiError::Http { status, body } => {
            assert_eq!(status, 404);
            assert_eq!(body, "ticket 99 not found");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn test_empty_body_is_a_decode_error() {
    let transport = ScriptedTransport::new().respond(200, "  ");
    let client = ApiClient::with_transport(BASE_URL, transport);

    let err = client.get::<TicketStatistics>("/api/statistics/tickets").unwrap_err();

    assert!(matches!(err, ApiError::Decode { .. }));
    assert!(err.is_network());
    assert_eq!(err.status(), None);
}

#[test]
fn test_malformed_body_is_a_decode_error() {
    let transport = ScriptedTransport::new().respond(200, "<html>oops</html>");
    let client = ApiClient::with_transport(BASE_URL, transport);

    let err = client.get::<Vec<Ticket>>("/api/tickets").unwrap_err();

    assert!(matches!(err, ApiError::Decode { .. }));
}

#[test]
fn test_transport_failure_is_a_network_error() {
    let transport = ScriptedTransport::new().fail("connection refused");
    let client = ApiClient::with_transport(BASE_URL, transport);

    let err = client.get::<Vec<Ticket>>("/api/tickets").unwrap_err();

    assert!(err.is_network());
    assert_eq!(err.status(), None);
    assert_eq!(err.to_string(), "Network error: connection refused");
}

#[test]
fn test_connection_check_reduces_to_bool() {
    let up = ScriptedTransport::new().respond(204, "");
    assert!(ApiClient::with_transport(BASE_URL, up.clone()).test_connection());
    assert_eq!(up.calls(), vec![format!("{}/api/health", BASE_URL)]);

    let failing = ScriptedTransport::new().respond(503, "maintenance");
    assert!(!ApiClient::with_transport(BASE_URL, failing).test_connection());

    let down = ScriptedTransport::new().fail("connection refused");
    assert!(!ApiClient::with_transport(BASE_URL, down).test_connection());
}

#[test]
fn test_system_statistics_aggregates_four_calls() {
    let transport = ScriptedTransport::new()
        .respond(200, TICKET_STATS)
        .respond(200, CLIENT_STATS)
        .respond(200, TECHNICIAN_STATS)
        .respond(200, APPOINTMENT_STATS);

    let stats = service(&transport).system_statistics().unwrap();

    assert_eq!(stats.tickets.total, 10);
    assert_eq!(stats.clients.new_this_month, 1);
    assert_eq!(stats.technicians.available, 1);
    assert_eq!(stats.appointments.upcoming, 2);
    assert_eq!(transport.calls().len(), 4);
}

#[test]
fn test_system_statistics_fails_fast_on_third_call() {
    let transport = ScriptedTransport::new()
        .respond(200, TICKET_STATS)
        .respond(200, CLIENT_STATS)
        .respond(503, "technician service down")
        .respond(200, APPOINTMENT_STATS);

    let err = service(&transport).system_statistics().unwrap_err();

    assert_eq!(err.status(), Some(503));
    assert!(err.to_string().contains("technician service down"));
    assert_eq!(
        transport.calls(),
        vec![
            format!("{}/api/statistics/tickets", BASE_URL),
            format!("{}/api/statistics/clients", BASE_URL),
            format!("{}/api/statistics/technicians", BASE_URL),
        ]
    );
}

#[test]
fn test_search_clients_encodes_query() {
    let transport = ScriptedTransport::new().respond(200, "[]");

    let clients = service(&transport).search_clients("acme & co").unwrap();

    assert!(clients.is_empty());
    assert_eq!(
        transport.calls(),
        vec![format!("{}/api/clients/search?q=acme+%26+co", BASE_URL)]
    );
}

#[test]
fn test_tickets_by_status_uses_server_status_name() {
    let transport = ScriptedTransport::new().respond(200, "[]");

    service(&transport)
        .tickets_by_status(TicketStatus::InProgress)
        .unwrap();

    assert_eq!(
        transport.calls(),
        vec![format!("{}/api/tickets?status=IN_PROGRESS", BASE_URL)]
    );
}

#[test]
fn test_ticket_deserializes_camel_case_and_unknown_status() {
    let json = r#"{
        "id": 42,
        "title": "VPN drops",
        "status": "WAITING_FOR_VENDOR",
        "priority": "CRITICAL",
        "technicianId": 7,
        "dueDate": "2024-03-01T09:30:00"
    }"#;

    let ticket: Ticket = serde_json::from_str(json).unwrap();

    assert_eq!(ticket.id, 42);
    assert_eq!(ticket.status, TicketStatus::Unknown);
    assert_eq!(ticket.priority, TicketPriority::Critical);
    assert_eq!(ticket.technician_id, Some(7));
    assert!(ticket.is_assigned());
    assert!(ticket.overdue.is_none());
}

#[test]
fn test_ticket_overdue_rules() {
    let now = at(2024, 6, 1);
    let past = Some(at(2024, 5, 1));
    let future = Some(at(2024, 7, 1));

    assert!(ticket(TicketStatus::Open, past, None).is_overdue_at(now));
    assert!(ticket(TicketStatus::InProgress, past, None).is_overdue_at(now));
    assert!(!ticket(TicketStatus::Resolved, past, None).is_overdue_at(now));
    assert!(!ticket(TicketStatus::Open, future, None).is_overdue_at(now));
    assert!(!ticket(TicketStatus::Open, None, None).is_overdue_at(now));

    // the server flag wins over the derived value
    assert!(ticket(TicketStatus::Closed, None, Some(true)).is_overdue_at(now));
    assert!(!ticket(TicketStatus::Open, past, Some(false)).is_overdue_at(now));
}

#[test]
fn test_null_or_missing_enum_fields_decode_as_unknown() {
    let json = r#"[
        {"id": 1, "title": "No status yet", "status": null, "priority": null},
        {"id": 2, "title": "Bare ticket"}
    ]"#;

    let tickets: Vec<Ticket> = serde_json::from_str(json).unwrap();

    assert_eq!(tickets.len(), 2);
    for ticket in &tickets {
        assert_eq!(ticket.status, TicketStatus::Unknown);
        assert_eq!(ticket.priority, TicketPriority::Unknown);
    }
}

#[test]
fn test_unknown_priority_ranks_lowest() {
    let ranked = [
        TicketPriority::Unknown,
        TicketPriority::Low,
        TicketPriority::Medium,
        TicketPriority::High,
        TicketPriority::Critical,
    ];

    assert!(ranked.windows(2).all(|w| w[0].rank() < w[1].rank()));
    let parsed: TicketPriority = serde_json::from_str(r#""URGENT""#).unwrap();
    assert_eq!(parsed, TicketPriority::Unknown);
}
