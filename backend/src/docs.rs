#![allow(dead_code)] // OpenAPI doc stubs are only referenced by utoipa macros.

use crate::{
    handlers::{
        admin::{
            BalanceListQuery, ExitListQuery, LeaveExportQuery, LeaveRequestListQuery,
            OnboardingListQuery,
        },
        health::HealthResponse,
        leave::YearQuery,
    },
    models::{
        employee::{CreateEmployeePayload, Employee, EmployeeRole},
        exit_request::{CreateExitPayload, ExitRequest, ExitStatus, UpdateExitStatusPayload},
        holiday::{CreateHolidayPayload, HolidayResponse},
        leave_balance::{AdjustBalancePayload, LeaveBalance, OpenYearPayload, OpenYearResponse},
        leave_category::{CreateLeaveCategoryPayload, LeaveCategory, UpdateLeaveCategoryPayload},
        leave_policy::{LeavePolicy, UpdateLeavePolicyPayload},
        leave_request::{ApprovePayload, LeaveRequest, RejectPayload, SubmitLeavePayload},
        onboarding::{
            CreateOnboardingPayload, OnboardingRecord, OnboardingStatus,
            UpdateOnboardingStatusPayload,
        },
        request_status::RequestStatus,
    },
    services::{
        leave_workflow::{LeavePreview, PreviewViolation},
        working_days::{DayEntry, DayKind},
    },
};
use utoipa::{
    openapi::security::{Http, HttpAuthScheme, SecurityScheme},
    Modify, OpenApi,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        health_doc,
        submit_leave_doc,
        my_leave_requests_doc,
        get_leave_request_doc,
        cancel_leave_request_doc,
        preview_leave_doc,
        my_balances_doc,
        list_categories_doc,
        list_holidays_doc,
        create_exit_doc,
        my_exits_doc,
        withdraw_exit_doc,
        admin_list_leave_requests_doc,
        admin_approve_leave_doc,
        admin_reject_leave_doc,
        admin_list_exits_doc,
        admin_update_exit_doc,
        admin_get_policy_doc,
        admin_update_policy_doc,
        admin_list_categories_doc,
        admin_create_category_doc,
        admin_update_category_doc,
        admin_list_holidays_doc,
        admin_create_holiday_doc,
        admin_delete_holiday_doc,
        admin_list_balances_doc,
        admin_open_year_doc,
        admin_adjust_balance_doc,
        admin_list_employees_doc,
        admin_create_employee_doc,
        admin_list_onboarding_doc,
        admin_create_onboarding_doc,
        admin_update_onboarding_doc,
        admin_export_doc
    ),
    components(
        schemas(
            HealthResponse,
            // leave
            SubmitLeavePayload,
            LeaveRequest,
            RequestStatus,
            LeavePreview,
            PreviewViolation,
            DayEntry,
            DayKind,
            ApprovePayload,
            RejectPayload,
            LeaveRequestListQuery,
            LeaveExportQuery,
            // balances & categories
            LeaveBalance,
            BalanceListQuery,
            OpenYearPayload,
            OpenYearResponse,
            AdjustBalancePayload,
            LeaveCategory,
            CreateLeaveCategoryPayload,
            UpdateLeaveCategoryPayload,
            // policy & calendar
            LeavePolicy,
            UpdateLeavePolicyPayload,
            CreateHolidayPayload,
            HolidayResponse,
            // people & workflows
            Employee,
            EmployeeRole,
            CreateEmployeePayload,
            ExitRequest,
            ExitStatus,
            CreateExitPayload,
            UpdateExitStatusPayload,
            ExitListQuery,
            OnboardingRecord,
            OnboardingStatus,
            CreateOnboardingPayload,
            UpdateOnboardingStatusPayload,
            OnboardingListQuery
        )
    ),
    modifiers(&SecuritySchemes),
    tags(
        (name = "Health", description = "Liveness"),
        (name = "Leave", description = "Leave requests, balances and calendar"),
        (name = "Exits", description = "Employee exit requests"),
        (name = "Approvals", description = "Manager/HR decisions"),
        (name = "Admin", description = "Tenant administration")
    ),
    security(("BearerAuth" = []))
)]
pub struct ApiDoc;

struct SecuritySchemes;

impl Modify for SecuritySchemes {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_default();

        let mut bearer = Http::new(HttpAuthScheme::Bearer);
        bearer.bearer_format = Some("JWT".to_string());

        components.add_security_scheme("BearerAuth", SecurityScheme::Http(bearer));
    }
}

#[utoipa::path(
    get,
    path = "/api/health",
    responses(
        (status = 200, body = HealthResponse),
        (status = 503, description = "Database unreachable", body = HealthResponse)
    ),
    tag = "Health",
    security(())
)]
fn health_doc() {}

#[utoipa::path(
    post,
    path = "/api/leave/requests",
    request_body = SubmitLeavePayload,
    responses(
        (status = 201, body = LeaveRequest),
        (status = 400, description = "INVALID_RANGE or VALIDATION_ERROR"),
        (status = 422, description = "POLICY_VIOLATION or INSUFFICIENT_BALANCE")
    ),
    tag = "Leave"
)]
fn submit_leave_doc() {}

#[utoipa::path(
    get,
    path = "/api/leave/requests/me",
    responses((status = 200, body = [LeaveRequest])),
    tag = "Leave"
)]
fn my_leave_requests_doc() {}

#[utoipa::path(
    get,
    path = "/api/leave/requests/{id}",
    params(("id" = String, Path, description = "Leave request ID")),
    responses((status = 200, body = LeaveRequest), (status = 404)),
    tag = "Leave"
)]
fn get_leave_request_doc() {}

#[utoipa::path(
    delete,
    path = "/api/leave/requests/{id}",
    params(("id" = String, Path, description = "Leave request ID")),
    responses(
        (status = 200, body = LeaveRequest),
        (status = 403, description = "Not the requester"),
        (status = 409, description = "INVALID_TRANSITION or CONCURRENCY_CONFLICT")
    ),
    tag = "Leave"
)]
fn cancel_leave_request_doc() {}

#[utoipa::path(
    post,
    path = "/api/leave/preview",
    request_body = SubmitLeavePayload,
    responses((status = 200, body = LeavePreview)),
    tag = "Leave"
)]
fn preview_leave_doc() {}

#[utoipa::path(
    get,
    path = "/api/leave/balances/me",
    params(YearQuery),
    responses((status = 200, body = [LeaveBalance])),
    tag = "Leave"
)]
fn my_balances_doc() {}

#[utoipa::path(
    get,
    path = "/api/leave/categories",
    responses((status = 200, body = [LeaveCategory])),
    tag = "Leave"
)]
fn list_categories_doc() {}

#[utoipa::path(
    get,
    path = "/api/holidays",
    params(YearQuery),
    responses((status = 200, body = [HolidayResponse])),
    tag = "Leave"
)]
fn list_holidays_doc() {}

#[utoipa::path(
    post,
    path = "/api/exits",
    request_body = CreateExitPayload,
    responses(
        (status = 201, body = ExitRequest),
        (status = 409, description = "An exit request is already open")
    ),
    tag = "Exits"
)]
fn create_exit_doc() {}

#[utoipa::path(
    get,
    path = "/api/exits/me",
    responses((status = 200, body = [ExitRequest])),
    tag = "Exits"
)]
fn my_exits_doc() {}

#[utoipa::path(
    put,
    path = "/api/exits/{id}/withdraw",
    params(("id" = String, Path, description = "Exit request ID")),
    responses(
        (status = 200, body = ExitRequest),
        (status = 409, description = "INVALID_TRANSITION")
    ),
    tag = "Exits"
)]
fn withdraw_exit_doc() {}

#[utoipa::path(
    get,
    path = "/api/admin/leave/requests",
    params(LeaveRequestListQuery),
    responses((status = 200, description = "Paginated leave requests", body = serde_json::Value)),
    tag = "Approvals"
)]
fn admin_list_leave_requests_doc() {}

#[utoipa::path(
    put,
    path = "/api/admin/leave/requests/{id}/approve",
    params(("id" = String, Path, description = "Leave request ID")),
    request_body = ApprovePayload,
    responses(
        (status = 200, body = LeaveRequest),
        (status = 403, description = "Approving one's own request"),
        (status = 409, description = "INVALID_TRANSITION or CONCURRENCY_CONFLICT"),
        (status = 422, description = "INSUFFICIENT_BALANCE")
    ),
    tag = "Approvals"
)]
fn admin_approve_leave_doc() {}

#[utoipa::path(
    put,
    path = "/api/admin/leave/requests/{id}/reject",
    params(("id" = String, Path, description = "Leave request ID")),
    request_body = RejectPayload,
    responses(
        (status = 200, body = LeaveRequest),
        (status = 400, description = "Missing comment"),
        (status = 409, description = "INVALID_TRANSITION")
    ),
    tag = "Approvals"
)]
fn admin_reject_leave_doc() {}

#[utoipa::path(
    get,
    path = "/api/admin/exits",
    params(ExitListQuery),
    responses((status = 200, description = "Paginated exit requests", body = serde_json::Value)),
    tag = "Approvals"
)]
fn admin_list_exits_doc() {}

#[utoipa::path(
    put,
    path = "/api/admin/exits/{id}/status",
    params(("id" = String, Path, description = "Exit request ID")),
    request_body = UpdateExitStatusPayload,
    responses(
        (status = 200, body = ExitRequest),
        (status = 409, description = "INVALID_TRANSITION or CONCURRENCY_CONFLICT")
    ),
    tag = "Approvals"
)]
fn admin_update_exit_doc() {}

#[utoipa::path(
    get,
    path = "/api/admin/leave/policy",
    responses((status = 200, body = LeavePolicy)),
    tag = "Admin"
)]
fn admin_get_policy_doc() {}

#[utoipa::path(
    put,
    path = "/api/admin/leave/policy",
    request_body = UpdateLeavePolicyPayload,
    responses((status = 200, body = LeavePolicy)),
    tag = "Admin"
)]
fn admin_update_policy_doc() {}

#[utoipa::path(
    get,
    path = "/api/admin/leave/categories",
    responses((status = 200, body = [LeaveCategory])),
    tag = "Admin"
)]
fn admin_list_categories_doc() {}

#[utoipa::path(
    post,
    path = "/api/admin/leave/categories",
    request_body = CreateLeaveCategoryPayload,
    responses((status = 201, body = LeaveCategory), (status = 409)),
    tag = "Admin"
)]
fn admin_create_category_doc() {}

#[utoipa::path(
    put,
    path = "/api/admin/leave/categories/{id}",
    params(("id" = String, Path, description = "Category ID")),
    request_body = UpdateLeaveCategoryPayload,
    responses((status = 200, body = LeaveCategory)),
    tag = "Admin"
)]
fn admin_update_category_doc() {}

#[utoipa::path(
    get,
    path = "/api/admin/holidays",
    params(YearQuery),
    responses((status = 200, body = [HolidayResponse])),
    tag = "Admin"
)]
fn admin_list_holidays_doc() {}

#[utoipa::path(
    post,
    path = "/api/admin/holidays",
    request_body = CreateHolidayPayload,
    responses((status = 201, body = HolidayResponse), (status = 409)),
    tag = "Admin"
)]
fn admin_create_holiday_doc() {}

#[utoipa::path(
    delete,
    path = "/api/admin/holidays/{id}",
    params(("id" = String, Path, description = "Holiday ID")),
    responses((status = 200, body = serde_json::Value), (status = 404)),
    tag = "Admin"
)]
fn admin_delete_holiday_doc() {}

#[utoipa::path(
    get,
    path = "/api/admin/leave/balances",
    params(BalanceListQuery),
    responses((status = 200, description = "Paginated balances", body = serde_json::Value)),
    tag = "Admin"
)]
fn admin_list_balances_doc() {}

#[utoipa::path(
    post,
    path = "/api/admin/leave/balances/open-year",
    request_body = OpenYearPayload,
    responses((status = 200, body = OpenYearResponse)),
    tag = "Admin"
)]
fn admin_open_year_doc() {}

#[utoipa::path(
    post,
    path = "/api/admin/leave/balances/{id}/adjust",
    params(("id" = String, Path, description = "Balance ID")),
    request_body = AdjustBalancePayload,
    responses(
        (status = 200, body = LeaveBalance),
        (status = 422, description = "INSUFFICIENT_BALANCE or POLICY_VIOLATION")
    ),
    tag = "Admin"
)]
fn admin_adjust_balance_doc() {}

#[utoipa::path(
    get,
    path = "/api/admin/employees",
    responses((status = 200, body = [Employee])),
    tag = "Admin"
)]
fn admin_list_employees_doc() {}

#[utoipa::path(
    post,
    path = "/api/admin/employees",
    request_body = CreateEmployeePayload,
    responses((status = 201, body = Employee), (status = 409)),
    tag = "Admin"
)]
fn admin_create_employee_doc() {}

#[utoipa::path(
    get,
    path = "/api/admin/onboarding",
    params(OnboardingListQuery),
    responses((status = 200, description = "Paginated onboarding records", body = serde_json::Value)),
    tag = "Admin"
)]
fn admin_list_onboarding_doc() {}

#[utoipa::path(
    post,
    path = "/api/admin/onboarding",
    request_body = CreateOnboardingPayload,
    responses((status = 201, body = OnboardingRecord)),
    tag = "Admin"
)]
fn admin_create_onboarding_doc() {}

#[utoipa::path(
    put,
    path = "/api/admin/onboarding/{id}/status",
    params(("id" = String, Path, description = "Onboarding record ID")),
    request_body = UpdateOnboardingStatusPayload,
    responses(
        (status = 200, body = OnboardingRecord),
        (status = 409, description = "INVALID_TRANSITION or CONCURRENCY_CONFLICT")
    ),
    tag = "Admin"
)]
fn admin_update_onboarding_doc() {}

#[utoipa::path(
    get,
    path = "/api/admin/leave/export",
    params(LeaveExportQuery),
    responses((status = 200, description = "CSV of leave requests", content_type = "text/csv", body = String)),
    tag = "Admin"
)]
fn admin_export_doc() {}
