use crate::{
    api::{ApiClient, ApiError},
    types::{
        Appointment, AppointmentStatistics, Client, ClientStatistics, SkillCoverage,
        SystemStatistics, Technician, TechnicianStatistics, Ticket, TicketStatistics,
        TicketStatus,
    },
};

/// Named endpoints of the helpdesk API on top of [`ApiClient`].
pub struct ApiService {
    client: ApiClient,
}

impl ApiService {
    /// Wraps an existing client, e.g. one built over a custom [`Transport`](crate::api::Transport).
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Builds a service talking HTTP to `base_url`.
    pub fn connect(base_url: &str) -> Result<Self, ApiError> {
        Ok(Self::new(ApiClient::new(base_url)?))
    }

    /// Base URL without trailing slash.
    pub fn base_url(&self) -> &str {
        self.client.base_url()
    }

    /// `true` when `/api/health` answers with a 2xx status.
    pub fn test_connection(&self) -> bool {
        self.client.test_connection()
    }

    /// Every client (`GET /api/clients`).
    pub fn clients(&self) -> Result<Vec<Client>, ApiError> {
        Ok(self.client.get("/api/clients")?.into_data())
    }

    /// One client by id. A missing client is an [`ApiError::Http`] with status 404.
    pub fn client(&self, id: u64) -> Result<Client, ApiError> {
        Ok(self.client.get(&format!("/api/clients/{}", id))?.into_data())
    }

    /// Searches clients by free text.
    ///
    /// # Arguments
    ///
    /// * `text` - Search text, sent percent-encoded as the `q` parameter
    ///
    /// # Example
    ///
    /// ```
    /// let matches = service.search_clients("acme corp")?;
    /// // GET /api/clients/search?q=acme+corp
    /// ```
    pub fn search_clients(&self, text: &str) -> Result<Vec<Client>, ApiError> {
        let path = format!("/api/clients/search?q={}", encode_query(text));
        Ok(self.client.get(&path)?.into_data())
    }

    /// Every ticket (`GET /api/tickets`).
    pub fn tickets(&self) -> Result<Vec<Ticket>, ApiError> {
        Ok(self.client.get("/api/tickets")?.into_data())
    }

    /// One ticket by id.
    pub fn ticket(&self, id: u64) -> Result<Ticket, ApiError> {
        Ok(self.client.get(&format!("/api/tickets/{}", id))?.into_data())
    }

    /// Tickets in one status, filtered by the server.
    ///
    /// # Arguments
    ///
    /// * `status` - Sent as its server name, e.g. `IN_PROGRESS`
    pub fn tickets_by_status(&self, status: TicketStatus) -> Result<Vec<Ticket>, ApiError> {
        let path = format!("/api/tickets?status={}", status.as_query());
        Ok(self.client.get(&path)?.into_data())
    }

    /// Tickets the server considers overdue.
    pub fn overdue_tickets(&self) -> Result<Vec<Ticket>, ApiError> {
        Ok(self.client.get("/api/tickets/overdue")?.into_data())
    }

    /// Every technician with skills and current workload.
    pub fn technicians(&self) -> Result<Vec<Technician>, ApiError> {
        Ok(self.client.get("/api/technicians")?.into_data())
    }

    pub fn technician(&self, id: u64) -> Result<Technician, ApiError> {
        Ok(self
            .client
            .get(&format!("/api/technicians/{}", id))?
            .into_data())
    }

    /// Active technicians below their workload limit.
    pub fn available_technicians(&self) -> Result<Vec<Technician>, ApiError> {
        Ok(self.client.get("/api/technicians/available")?.into_data())
    }

    /// Technician and open-ticket counts per skill.
    pub fn skill_coverage(&self) -> Result<Vec<SkillCoverage>, ApiError> {
        Ok(self
            .client
            .get("/api/technicians/skills/coverage")?
            .into_data())
    }

    pub fn appointments(&self) -> Result<Vec<Appointment>, ApiError> {
        Ok(self.client.get("/api/appointments")?.into_data())
    }

    /// Scheduled appointments that have not started yet.
    pub fn upcoming_appointments(&self) -> Result<Vec<Appointment>, ApiError> {
        Ok(self.client.get("/api/appointments/upcoming")?.into_data())
    }

    /// Counters from `/api/statistics/tickets`. The other three statistics
    /// endpoints have one method each.
    pub fn ticket_statistics(&self) -> Result<TicketStatistics, ApiError> {
        Ok(self.client.get("/api/statistics/tickets")?.into_data())
    }

    pub fn client_statistics(&self) -> Result<ClientStatistics, ApiError> {
        Ok(self.client.get("/api/statistics/clients")?.into_data())
    }

    pub fn technician_statistics(&self) -> Result<TechnicianStatistics, ApiError> {
        Ok(self.client.get("/api/statistics/technicians")?.into_data())
    }

    pub fn appointment_statistics(&self) -> Result<AppointmentStatistics, ApiError> {
        Ok(self.client.get("/api/statistics/appointments")?.into_data())
    }

    /// Fetches all four statistics in order. The first failure is returned
    /// as is and the remaining calls are not made.
    ///
    /// # Example
    ///
    /// ```
    /// let stats = service.system_statistics()?;
    /// println!("{} open tickets", stats.tickets.open);
    /// ```
    pub fn system_statistics(&self) -> Result<SystemStatistics, ApiError> {
        let tickets = self.ticket_statistics()?;
        let clients = self.client_statistics()?;
        let technicians = self.technician_statistics()?;
        let appointments = self.appointment_statistics()?;

        Ok(SystemStatistics {
            tickets,
            clients,
            technicians,
            appointments,
        })
    }
}

/// Encodes a query parameter value (`application/x-www-form-urlencoded`).
fn encode_query(value: &str) -> String {
    url::form_urlencoded::byte_serialize(value.as_bytes()).collect()
}

#[cfg(test)]
mod tests {
    use super::encode_query;

    #[test]
    fn encodes_reserved_characters() {
        assert_eq!(encode_query("acme corp"), "acme+corp");
        assert_eq!(encode_query("a&b=c"), "a%26b%3Dc");
        assert_eq!(encode_query("plain-text_1.0"), "plain-text_1.0");
    }
}
