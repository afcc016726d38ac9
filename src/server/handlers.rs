//! MCP tool handlers for the Folk server.
//!
//! This module registers every tool with the rmcp SDK's tool_router and turns
//! tool results into JSON text content.

use crate::client::AsyncFolkClient;
use crate::error::FolkApiError;
use crate::tools::*;
use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::*;
use rmcp::{tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use serde::Serialize;
use std::borrow::Cow;
use std::sync::Arc;

const INSTRUCTIONS: &str = "MCP server for the Folk CRM.\n\
Two-phase lookup: call find_person or find_company to get an ID, then use that ID \
with get_person_details, add_note, set_reminder and the other tools. \
Folk IDs are a prefix plus a UUID (e.g. per_xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx); never guess them.\n\
Groups: find_people_in_group and find_companies_in_group take a group name and an optional \
Status value; call list_groups when the name is unknown.\n\
Browsing: browse_* tools page with page/per_page (max 50). Pass next_cursor back as cursor \
(with page + 1) to continue without re-walking earlier pages.\n\
Dates are ISO 8601 with an offset, e.g. 2026-01-28T09:00:00Z.";

/// The Folk MCP server that exposes tools for interacting with the Folk CRM.
#[derive(Clone)]
pub struct FolkMcpServer {
    search: Arc<SearchTools>,
    groups: Arc<GroupTools>,
    details: Arc<DetailsTools>,
    browse: Arc<BrowseTools>,
    actions: Arc<ActionTools>,
    tool_router: ToolRouter<Self>,
}

#[tool_handler]
impl ServerHandler for FolkMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities {
                tools: Some(Default::default()),
                ..Default::default()
            },
            server_info: Implementation {
                name: "folk-mcp-server".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                icons: None,
                title: Some("Folk CRM".into()),
                website_url: None,
            },
            instructions: Some(INSTRUCTIONS.into()),
        }
    }
}

/// Validation failures become `invalid_params`; anything from the API is an
/// internal error carrying the status and Folk's message.
pub fn to_mcp_error(e: FolkApiError) -> McpError {
    let code = if e.is_validation() {
        ErrorCode::INVALID_PARAMS
    } else {
        tracing::warn!("Tool call failed: {}", e);
        ErrorCode::INTERNAL_ERROR
    };

    McpError {
        code,
        message: Cow::from(e.to_string()),
        data: e.status().map(|status| serde_json::json!({ "status": status })),
    }
}

fn json_result<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let text = serde_json::to_string_pretty(value).map_err(|e| McpError {
        code: ErrorCode::INTERNAL_ERROR,
        message: Cow::from(e.to_string()),
        data: None,
    })?;
    Ok(CallToolResult::success(vec![Content::text(text)]))
}

#[tool_router]
impl FolkMcpServer {
    /// Create a new Folk MCP server.
    pub fn new(client: Arc<dyn AsyncFolkClient>) -> Self {
        Self {
            search: Arc::new(SearchTools::new(client.clone())),
            groups: Arc::new(GroupTools::new(client.clone())),
            details: Arc::new(DetailsTools::new(client.clone())),
            browse: Arc::new(BrowseTools::new(client.clone())),
            actions: Arc::new(ActionTools::new(client)),
            tool_router: Self::tool_router(),
        }
    }

    // ========================= Search =========================

    #[tool(
        description = "Find people by name. Returns up to 10 matches as {id, name, email}. Use the id with the other tools."
    )]
    async fn find_person(
        &self,
        params: Parameters<FindByNameParams>,
    ) -> Result<CallToolResult, McpError> {
        let response = self.search.find_person(params.0).await.map_err(to_mcp_error)?;
        json_result(&response)
    }

    #[tool(
        description = "Find companies by name. Returns up to 10 matches as {id, name, industry}."
    )]
    async fn find_company(
        &self,
        params: Parameters<FindByNameParams>,
    ) -> Result<CallToolResult, McpError> {
        let response = self.search.find_company(params.0).await.map_err(to_mcp_error)?;
        json_result(&response)
    }

    #[tool(
        description = "Find people in a group by group name, optionally filtered by the group's Status field or another custom field. Returns each person's status and group custom fields."
    )]
    async fn find_people_in_group(
        &self,
        params: Parameters<GroupSearchParams>,
    ) -> Result<CallToolResult, McpError> {
        let response = self
            .groups
            .find_people_in_group(params.0)
            .await
            .map_err(to_mcp_error)?;
        json_result(&response)
    }

    #[tool(
        description = "Find companies in a group by group name, optionally filtered by the group's Status field or another custom field."
    )]
    async fn find_companies_in_group(
        &self,
        params: Parameters<GroupSearchParams>,
    ) -> Result<CallToolResult, McpError> {
        let response = self
            .groups
            .find_companies_in_group(params.0)
            .await
            .map_err(to_mcp_error)?;
        json_result(&response)
    }

    // ========================= Details =========================

    #[tool(description = "Get the full record of a person by Folk ID (from find_person).")]
    async fn get_person_details(
        &self,
        params: Parameters<PersonIdParams>,
    ) -> Result<CallToolResult, McpError> {
        let person = self
            .details
            .get_person_details(params.0)
            .await
            .map_err(to_mcp_error)?;
        json_result(&person)
    }

    #[tool(description = "Get the full record of a company by Folk ID (from find_company).")]
    async fn get_company_details(
        &self,
        params: Parameters<CompanyIdParams>,
    ) -> Result<CallToolResult, McpError> {
        let company = self
            .details
            .get_company_details(params.0)
            .await
            .map_err(to_mcp_error)?;
        json_result(&company)
    }

    #[tool(description = "Get a note by Folk ID (from get_notes).")]
    async fn get_note_details(
        &self,
        params: Parameters<NoteIdParams>,
    ) -> Result<CallToolResult, McpError> {
        let note = self
            .details
            .get_note_details(params.0)
            .await
            .map_err(to_mcp_error)?;
        json_result(&note)
    }

    #[tool(description = "Get a reminder by Folk ID (from get_reminders).")]
    async fn get_reminder_details(
        &self,
        params: Parameters<ReminderIdParams>,
    ) -> Result<CallToolResult, McpError> {
        let reminder = self
            .details
            .get_reminder_details(params.0)
            .await
            .map_err(to_mcp_error)?;
        json_result(&reminder)
    }

    #[tool(description = "Get a workspace user by Folk ID (from list_users).")]
    async fn get_user_details(
        &self,
        params: Parameters<UserIdParams>,
    ) -> Result<CallToolResult, McpError> {
        let user = self
            .details
            .get_user_details(params.0)
            .await
            .map_err(to_mcp_error)?;
        json_result(&user)
    }

    #[tool(description = "Get the authenticated user as {id, name, email}.")]
    async fn whoami(&self) -> Result<CallToolResult, McpError> {
        let me = self.details.whoami().await.map_err(to_mcp_error)?;
        json_result(&me)
    }

    // ========================= Browse =========================

    #[tool(
        description = "Browse all people, one page at a time. Use when you have no name to search for."
    )]
    async fn browse_people(
        &self,
        params: Parameters<BrowseParams>,
    ) -> Result<CallToolResult, McpError> {
        let listing = self.browse.browse_people(params.0).await.map_err(to_mcp_error)?;
        json_result(&listing)
    }

    #[tool(description = "Browse all companies, one page at a time.")]
    async fn browse_companies(
        &self,
        params: Parameters<BrowseParams>,
    ) -> Result<CallToolResult, McpError> {
        let listing = self
            .browse
            .browse_companies(params.0)
            .await
            .map_err(to_mcp_error)?;
        json_result(&listing)
    }

    #[tool(description = "List the groups in the Folk workspace.")]
    async fn list_groups(
        &self,
        params: Parameters<BrowseParams>,
    ) -> Result<CallToolResult, McpError> {
        let listing = self.browse.list_groups(params.0).await.map_err(to_mcp_error)?;
        json_result(&listing)
    }

    #[tool(description = "List the users of the Folk workspace.")]
    async fn list_users(
        &self,
        params: Parameters<BrowseParams>,
    ) -> Result<CallToolResult, McpError> {
        let listing = self.browse.list_users(params.0).await.map_err(to_mcp_error)?;
        json_result(&listing)
    }

    #[tool(
        description = "Browse the deals (or another custom object type) stored in a group."
    )]
    async fn browse_deals(
        &self,
        params: Parameters<BrowseDealsParams>,
    ) -> Result<CallToolResult, McpError> {
        let listing = self.browse.browse_deals(params.0).await.map_err(to_mcp_error)?;
        json_result(&listing)
    }

    #[tool(description = "Get the notes attached to a person, company or object.")]
    async fn get_notes(
        &self,
        params: Parameters<EntityListParams>,
    ) -> Result<CallToolResult, McpError> {
        let listing = self.browse.get_notes(params.0).await.map_err(to_mcp_error)?;
        json_result(&listing)
    }

    #[tool(description = "Get the reminders attached to a person, company or object.")]
    async fn get_reminders(
        &self,
        params: Parameters<EntityListParams>,
    ) -> Result<CallToolResult, McpError> {
        let listing = self
            .browse
            .get_reminders(params.0)
            .await
            .map_err(to_mcp_error)?;
        json_result(&listing)
    }

    // ========================= Actions =========================

    #[tool(description = "Add a new person to the CRM.")]
    async fn add_person(
        &self,
        params: Parameters<AddPersonParams>,
    ) -> Result<CallToolResult, McpError> {
        let ack = self.actions.add_person(params.0).await.map_err(to_mcp_error)?;
        json_result(&ack)
    }

    #[tool(
        description = "Update a person's fields. Only the fields you pass are changed; email and phone replace the existing ones."
    )]
    async fn update_person(
        &self,
        params: Parameters<UpdatePersonParams>,
    ) -> Result<CallToolResult, McpError> {
        let ack = self.actions.update_person(params.0).await.map_err(to_mcp_error)?;
        json_result(&ack)
    }

    #[tool(description = "Delete a person by Folk ID.")]
    async fn delete_person(
        &self,
        params: Parameters<PersonIdParams>,
    ) -> Result<CallToolResult, McpError> {
        let ack = self.actions.delete_person(params.0).await.map_err(to_mcp_error)?;
        json_result(&ack)
    }

    #[tool(description = "Add a new company to the CRM.")]
    async fn add_company(
        &self,
        params: Parameters<AddCompanyParams>,
    ) -> Result<CallToolResult, McpError> {
        let ack = self.actions.add_company(params.0).await.map_err(to_mcp_error)?;
        json_result(&ack)
    }

    #[tool(description = "Update a company's fields. Only the fields you pass are changed.")]
    async fn update_company(
        &self,
        params: Parameters<UpdateCompanyParams>,
    ) -> Result<CallToolResult, McpError> {
        let ack = self.actions.update_company(params.0).await.map_err(to_mcp_error)?;
        json_result(&ack)
    }

    #[tool(description = "Delete a company by Folk ID.")]
    async fn delete_company(
        &self,
        params: Parameters<CompanyIdParams>,
    ) -> Result<CallToolResult, McpError> {
        let ack = self.actions.delete_company(params.0).await.map_err(to_mcp_error)?;
        json_result(&ack)
    }

    #[tool(description = "Add a note to a person, company or object.")]
    async fn add_note(
        &self,
        params: Parameters<AddNoteParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!("MCP Handler: add_note called");
        let ack = self.actions.add_note(params.0).await.map_err(to_mcp_error)?;
        json_result(&ack)
    }

    #[tool(description = "Change a note's content or visibility.")]
    async fn update_note(
        &self,
        params: Parameters<UpdateNoteParams>,
    ) -> Result<CallToolResult, McpError> {
        let ack = self.actions.update_note(params.0).await.map_err(to_mcp_error)?;
        json_result(&ack)
    }

    #[tool(description = "Delete a note by Folk ID.")]
    async fn delete_note(
        &self,
        params: Parameters<NoteIdParams>,
    ) -> Result<CallToolResult, McpError> {
        let ack = self.actions.delete_note(params.0).await.map_err(to_mcp_error)?;
        json_result(&ack)
    }

    #[tool(
        description = "Set a one-time reminder on a person, company or object. Public reminders without assignees are assigned to you."
    )]
    async fn set_reminder(
        &self,
        params: Parameters<SetReminderParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!("MCP Handler: set_reminder called");
        let ack = self.actions.set_reminder(params.0).await.map_err(to_mcp_error)?;
        json_result(&ack)
    }

    #[tool(description = "Change a reminder's text, time, visibility or assignees.")]
    async fn update_reminder(
        &self,
        params: Parameters<UpdateReminderParams>,
    ) -> Result<CallToolResult, McpError> {
        let ack = self
            .actions
            .update_reminder(params.0)
            .await
            .map_err(to_mcp_error)?;
        json_result(&ack)
    }

    #[tool(description = "Delete a reminder by Folk ID.")]
    async fn delete_reminder(
        &self,
        params: Parameters<ReminderIdParams>,
    ) -> Result<CallToolResult, McpError> {
        let ack = self
            .actions
            .delete_reminder(params.0)
            .await
            .map_err(to_mcp_error)?;
        json_result(&ack)
    }

    #[tool(
        description = "Log an interaction (email, meeting, call, ...) with a person or company."
    )]
    async fn log_interaction(
        &self,
        params: Parameters<LogInteractionParams>,
    ) -> Result<CallToolResult, McpError> {
        let ack = self
            .actions
            .log_interaction(params.0)
            .await
            .map_err(to_mcp_error)?;
        json_result(&ack)
    }
}
