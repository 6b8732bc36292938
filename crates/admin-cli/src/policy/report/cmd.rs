/*
 * SPDX-FileCopyrightText: Copyright (c) 2026 NVIDIA CORPORATION & AFFILIATES. All rights reserved.
 * SPDX-License-Identifier: Apache-2.0
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 * You may obtain a copy of the License at
 *
 * http://www.apache.org/licenses/LICENSE-2.0
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the License for the specific language governing permissions and
 * limitations under the License.
 */

use std::fmt::Write;
use std::pin::Pin;

use api_client::GuestConfigApi;
use api_model::{GuestPolicyAssignment, GuestPolicyAssignmentReport, InitiativeKey};
use prettytable::{Table, row};

use crate::cfg::cli_options::OutputFormat;
use crate::errors::{CliError, CliResult};
use crate::policy::common::{QueryScope, ReportQuery};
use crate::{async_write, async_write_table_as_csv, async_writeln};

/// Issues exactly one service read, chosen by the query's scope tag and
/// the `detailed` modifier, and forwards the result to the sink.
///
/// `latest` only reaches the report-fetching operations; assignments
/// have no "latest" notion.
pub(crate) async fn handle_report<A: GuestConfigApi>(
    query: ReportQuery,
    api_client: &A,
    output_format: &OutputFormat,
    output_file: &mut Pin<Box<dyn tokio::io::AsyncWrite>>,
) -> CliResult<()> {
    match &query.scope {
        QueryScope::ReportId(report_id) => {
            let report = api_client.get_report_by_id(report_id).await?;
            if report.is_some() {
                write_report(output_file, output_format, report.as_ref()).await?;
            }
        }
        QueryScope::Vm => {
            if query.detailed {
                let reports = api_client
                    .list_reports(&query.resource_group, &query.vm_name, query.latest)
                    .await?;
                // Only a present-but-empty result set is suppressed; an
                // absent one still reaches the sink, which drops it.
                if reports.is_none() || reports.as_ref().is_some_and(|r| !r.is_empty()) {
                    write_report_list(output_file, output_format, reports.as_deref()).await?;
                }
            } else {
                let assignments = api_client
                    .list_assignments(&query.resource_group, &query.vm_name)
                    .await?;
                if assignments.is_none() || assignments.as_ref().is_some_and(|a| !a.is_empty()) {
                    write_assignment_list(output_file, output_format, assignments.as_deref())
                        .await?;
                }
            }
        }
        QueryScope::InitiativeName(name) => {
            let initiative = InitiativeKey::Name(name.clone());
            handle_initiative_report(&query, initiative, api_client, output_format, output_file)
                .await?;
        }
        QueryScope::InitiativeId(id) => {
            let initiative = InitiativeKey::DefinitionId(id.clone());
            handle_initiative_report(&query, initiative, api_client, output_format, output_file)
                .await?;
        }
    }

    Ok(())
}

async fn handle_initiative_report<A: GuestConfigApi>(
    query: &ReportQuery,
    initiative: InitiativeKey,
    api_client: &A,
    output_format: &OutputFormat,
    output_file: &mut Pin<Box<dyn tokio::io::AsyncWrite>>,
) -> CliResult<()> {
    if query.detailed {
        let reports = api_client
            .list_reports_by_initiative(
                &query.resource_group,
                &query.vm_name,
                &initiative,
                query.latest,
            )
            .await?;
        if reports.is_none() || reports.as_ref().is_some_and(|r| !r.is_empty()) {
            write_report_list(output_file, output_format, reports.as_deref()).await?;
        }
    } else {
        let assignments = api_client
            .list_assignments_by_initiative(&query.resource_group, &query.vm_name, &initiative)
            .await?;
        if assignments.is_none() || assignments.as_ref().is_some_and(|a| !a.is_empty()) {
            write_assignment_list(output_file, output_format, assignments.as_deref()).await?;
        }
    }

    Ok(())
}

fn convert_assignments_to_nice_table(assignments: &[GuestPolicyAssignment]) -> Box<Table> {
    let mut table = Box::new(Table::new());

    table.set_titles(row![
        "Name",
        "Initiative",
        "Compliance",
        "Last Checked",
        "Latest Report Id"
    ]);

    for assignment in assignments {
        table.add_row(row![
            assignment.name,
            assignment.initiative_name.as_deref().unwrap_or_default(),
            assignment.compliance_status,
            assignment
                .last_compliance_status_checked
                .map(|t| t.to_rfc3339())
                .unwrap_or_default(),
            assignment.latest_report_id.as_deref().unwrap_or_default()
        ]);
    }

    table
}

fn convert_reports_to_nice_table(reports: &[GuestPolicyAssignmentReport]) -> Box<Table> {
    let mut table = Box::new(Table::new());

    table.set_titles(row![
        "Report Id",
        "Assignment",
        "VM",
        "Start Time",
        "End Time",
        "Compliance"
    ]);

    for report in reports {
        table.add_row(row![
            report.id,
            report.assignment_name,
            report.vm.name,
            report
                .start_time
                .map(|t| t.to_rfc3339())
                .unwrap_or_default(),
            report.end_time.map(|t| t.to_rfc3339()).unwrap_or_default(),
            report.compliance_status
        ]);
    }

    table
}

fn convert_report_to_nice_format(report: &GuestPolicyAssignmentReport) -> CliResult<String> {
    let mut lines = String::new();

    let data = vec![
        ("REPORT ID", report.id.clone()),
        ("ASSIGNMENT", report.assignment_name.clone()),
        ("VM", report.vm.name.clone()),
        ("VM UUID", report.vm.uuid.clone().unwrap_or_default()),
        ("COMPLIANCE", report.compliance_status.to_string()),
        (
            "OPERATION TYPE",
            report
                .operation_type
                .map(|op| format!("{op:?}"))
                .unwrap_or_default(),
        ),
        (
            "START TIME",
            report
                .start_time
                .map(|t| t.to_rfc3339())
                .unwrap_or_default(),
        ),
        (
            "END TIME",
            report.end_time.map(|t| t.to_rfc3339()).unwrap_or_default(),
        ),
    ];

    let width = 1 + data
        .iter()
        .fold(0, |accum, (key, _value)| std::cmp::max(accum, key.len()));

    for (key, value) in data {
        writeln!(&mut lines, "{key:<width$}: {value}")?;
    }

    writeln!(&mut lines, "RESOURCES:")?;
    if report.resources.is_empty() {
        writeln!(&mut lines, "\tEMPTY")?;
    } else {
        for resource in &report.resources {
            writeln!(
                &mut lines,
                "\t{} [{}]",
                resource.resource_id, resource.compliance_status
            )?;
            for reason in &resource.reasons {
                writeln!(&mut lines, "\t\t- {}", reason.phrase)?;
            }
            writeln!(
                &mut lines,
                "\t--------------------------------------------------"
            )?;
        }
    }

    Ok(lines)
}

// The write_* sinks drop an absent payload silently; suppressing a
// present-but-empty one is the caller's guard, above.

async fn write_assignment_list(
    output_file: &mut Pin<Box<dyn tokio::io::AsyncWrite>>,
    output_format: &OutputFormat,
    assignments: Option<&[GuestPolicyAssignment]>,
) -> CliResult<()> {
    let Some(assignments) = assignments else {
        return Ok(());
    };

    match output_format {
        OutputFormat::Json => {
            async_writeln!(output_file, "{}", serde_json::to_string_pretty(assignments)?)?;
        }
        OutputFormat::AsciiTable => {
            let table = convert_assignments_to_nice_table(assignments);
            async_write!(output_file, "{table}")?;
        }
        OutputFormat::Csv => {
            let table = convert_assignments_to_nice_table(assignments);
            async_write_table_as_csv!(output_file, table)?;
        }
        OutputFormat::Yaml => {
            return Err(CliError::NotImplemented(
                "YAML formatted output".to_string(),
            ));
        }
    }
    Ok(())
}

async fn write_report_list(
    output_file: &mut Pin<Box<dyn tokio::io::AsyncWrite>>,
    output_format: &OutputFormat,
    reports: Option<&[GuestPolicyAssignmentReport]>,
) -> CliResult<()> {
    let Some(reports) = reports else {
        return Ok(());
    };

    match output_format {
        OutputFormat::Json => {
            async_writeln!(output_file, "{}", serde_json::to_string_pretty(reports)?)?;
        }
        OutputFormat::AsciiTable => {
            let table = convert_reports_to_nice_table(reports);
            async_write!(output_file, "{table}")?;
        }
        OutputFormat::Csv => {
            let table = convert_reports_to_nice_table(reports);
            async_write_table_as_csv!(output_file, table)?;
        }
        OutputFormat::Yaml => {
            return Err(CliError::NotImplemented(
                "YAML formatted output".to_string(),
            ));
        }
    }
    Ok(())
}

async fn write_report(
    output_file: &mut Pin<Box<dyn tokio::io::AsyncWrite>>,
    output_format: &OutputFormat,
    report: Option<&GuestPolicyAssignmentReport>,
) -> CliResult<()> {
    let Some(report) = report else {
        return Ok(());
    };

    match output_format {
        OutputFormat::Json => {
            async_writeln!(output_file, "{}", serde_json::to_string_pretty(report)?)?;
        }
        OutputFormat::AsciiTable => {
            async_write!(output_file, "{}", convert_report_to_nice_format(report)?)?;
        }
        OutputFormat::Csv => {
            return Err(CliError::NotImplemented("CSV formatted output".to_string()));
        }
        OutputFormat::Yaml => {
            return Err(CliError::NotImplemented(
                "YAML formatted output".to_string(),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use api_client::ClientResult;
    use api_model::{ComplianceStatus, VmInfo};
    use tokio::io::AsyncReadExt;

    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    enum Call {
        ListAssignments {
            resource_group: String,
            vm_name: String,
        },
        ListAssignmentsByInitiative {
            resource_group: String,
            vm_name: String,
            initiative: InitiativeKey,
        },
        ListReports {
            resource_group: String,
            vm_name: String,
            latest_only: bool,
        },
        ListReportsByInitiative {
            resource_group: String,
            vm_name: String,
            initiative: InitiativeKey,
            latest_only: bool,
        },
        GetReportById {
            report_id: String,
        },
    }

    /// Records every service call and answers from canned results.
    #[derive(Default)]
    struct MockApi {
        assignments: Option<Vec<GuestPolicyAssignment>>,
        reports: Option<Vec<GuestPolicyAssignmentReport>>,
        report: Option<GuestPolicyAssignmentReport>,
        calls: Mutex<Vec<Call>>,
    }

    impl MockApi {
        fn record(&self, call: Call) {
            self.calls.lock().unwrap().push(call);
        }

        fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl GuestConfigApi for MockApi {
        async fn list_assignments(
            &self,
            resource_group: &str,
            vm_name: &str,
        ) -> ClientResult<Option<Vec<GuestPolicyAssignment>>> {
            self.record(Call::ListAssignments {
                resource_group: resource_group.to_string(),
                vm_name: vm_name.to_string(),
            });
            Ok(self.assignments.clone())
        }

        async fn list_assignments_by_initiative(
            &self,
            resource_group: &str,
            vm_name: &str,
            initiative: &InitiativeKey,
        ) -> ClientResult<Option<Vec<GuestPolicyAssignment>>> {
            self.record(Call::ListAssignmentsByInitiative {
                resource_group: resource_group.to_string(),
                vm_name: vm_name.to_string(),
                initiative: initiative.clone(),
            });
            Ok(self.assignments.clone())
        }

        async fn list_reports(
            &self,
            resource_group: &str,
            vm_name: &str,
            latest_only: bool,
        ) -> ClientResult<Option<Vec<GuestPolicyAssignmentReport>>> {
            self.record(Call::ListReports {
                resource_group: resource_group.to_string(),
                vm_name: vm_name.to_string(),
                latest_only,
            });
            Ok(self.reports.clone())
        }

        async fn list_reports_by_initiative(
            &self,
            resource_group: &str,
            vm_name: &str,
            initiative: &InitiativeKey,
            latest_only: bool,
        ) -> ClientResult<Option<Vec<GuestPolicyAssignmentReport>>> {
            self.record(Call::ListReportsByInitiative {
                resource_group: resource_group.to_string(),
                vm_name: vm_name.to_string(),
                initiative: initiative.clone(),
                latest_only,
            });
            Ok(self.reports.clone())
        }

        async fn get_report_by_id(
            &self,
            report_id: &str,
        ) -> ClientResult<Option<GuestPolicyAssignmentReport>> {
            self.record(Call::GetReportById {
                report_id: report_id.to_string(),
            });
            Ok(self.report.clone())
        }
    }

    fn assignment(name: &str) -> GuestPolicyAssignment {
        GuestPolicyAssignment {
            name: name.to_string(),
            id: None,
            initiative_name: None,
            initiative_id: None,
            compliance_status: ComplianceStatus::Compliant,
            last_compliance_status_checked: None,
            latest_report_id: None,
        }
    }

    fn report(id: &str) -> GuestPolicyAssignmentReport {
        GuestPolicyAssignmentReport {
            id: id.to_string(),
            assignment_name: "AuditSecureProtocol".to_string(),
            vm: VmInfo {
                name: "vm1".to_string(),
                uuid: None,
            },
            start_time: None,
            end_time: None,
            compliance_status: ComplianceStatus::NonCompliant,
            operation_type: None,
            resources: vec![],
        }
    }

    fn query(scope: QueryScope, detailed: bool, latest: bool) -> ReportQuery {
        ReportQuery {
            scope,
            resource_group: "rg1".to_string(),
            vm_name: "vm1".to_string(),
            detailed,
            latest,
        }
    }

    /// Runs the query against the mock with a JSON sink and returns what
    /// was emitted.
    async fn run_and_capture(api: &MockApi, query: ReportQuery) -> String {
        let (tx, mut rx) = tokio::io::duplex(64 * 1024);
        let mut output: Pin<Box<dyn tokio::io::AsyncWrite>> = Box::pin(tx);

        handle_report(query, api, &OutputFormat::Json, &mut output)
            .await
            .expect("handle_report should succeed");
        drop(output);

        let mut captured = String::new();
        rx.read_to_string(&mut captured)
            .await
            .expect("should read captured output");
        captured
    }

    #[tokio::test]
    async fn vm_scope_lists_assignments_once_and_emits_them_in_order() {
        let api = MockApi {
            assignments: Some(vec![assignment("a1"), assignment("a2")]),
            ..Default::default()
        };

        let output = run_and_capture(&api, query(QueryScope::Vm, false, false)).await;

        assert_eq!(
            api.calls(),
            vec![Call::ListAssignments {
                resource_group: "rg1".to_string(),
                vm_name: "vm1".to_string(),
            }]
        );
        let emitted: Vec<GuestPolicyAssignment> = serde_json::from_str(&output).unwrap();
        assert_eq!(emitted.len(), 2);
        assert_eq!(emitted[0].name, "a1");
        assert_eq!(emitted[1].name, "a2");
    }

    #[tokio::test]
    async fn vm_scope_detailed_forwards_latest_to_the_report_operation() {
        let api = MockApi {
            reports: Some(vec![]),
            ..Default::default()
        };

        let output = run_and_capture(&api, query(QueryScope::Vm, true, true)).await;

        assert_eq!(
            api.calls(),
            vec![Call::ListReports {
                resource_group: "rg1".to_string(),
                vm_name: "vm1".to_string(),
                latest_only: true,
            }]
        );
        // Present-but-empty report list: nothing is emitted.
        assert!(output.is_empty());
    }

    #[tokio::test]
    async fn latest_has_no_effect_without_detailed() {
        let api = MockApi {
            assignments: Some(vec![assignment("a1")]),
            ..Default::default()
        };

        run_and_capture(&api, query(QueryScope::Vm, false, true)).await;

        // The assignment operation has no latest parameter to forward to.
        assert_eq!(
            api.calls(),
            vec![Call::ListAssignments {
                resource_group: "rg1".to_string(),
                vm_name: "vm1".to_string(),
            }]
        );
    }

    #[tokio::test]
    async fn absent_assignment_list_reaches_the_sink_and_emits_nothing() {
        let api = MockApi::default();

        let output = run_and_capture(&api, query(QueryScope::Vm, false, false)).await;

        assert_eq!(api.calls().len(), 1);
        assert!(output.is_empty());
    }

    #[tokio::test]
    async fn empty_assignment_list_emits_nothing() {
        let api = MockApi {
            assignments: Some(vec![]),
            ..Default::default()
        };

        let output = run_and_capture(&api, query(QueryScope::Vm, false, false)).await;

        assert!(output.is_empty());
    }

    #[tokio::test]
    async fn initiative_name_detailed_passes_the_name_and_latest_false() {
        let api = MockApi {
            reports: Some(vec![report("r1")]),
            ..Default::default()
        };

        let output = run_and_capture(
            &api,
            query(
                QueryScope::InitiativeName("init1".to_string()),
                true,
                false,
            ),
        )
        .await;

        assert_eq!(
            api.calls(),
            vec![Call::ListReportsByInitiative {
                resource_group: "rg1".to_string(),
                vm_name: "vm1".to_string(),
                initiative: InitiativeKey::Name("init1".to_string()),
                latest_only: false,
            }]
        );
        let emitted: Vec<GuestPolicyAssignmentReport> = serde_json::from_str(&output).unwrap();
        assert_eq!(emitted.len(), 1);
        assert_eq!(emitted[0].id, "r1");
    }

    #[tokio::test]
    async fn initiative_id_without_detailed_lists_assignments_for_that_initiative() {
        let api = MockApi {
            assignments: Some(vec![assignment("a1")]),
            ..Default::default()
        };

        run_and_capture(
            &api,
            query(
                QueryScope::InitiativeId("/definitions/d1".to_string()),
                false,
                false,
            ),
        )
        .await;

        assert_eq!(
            api.calls(),
            vec![Call::ListAssignmentsByInitiative {
                resource_group: "rg1".to_string(),
                vm_name: "vm1".to_string(),
                initiative: InitiativeKey::DefinitionId("/definitions/d1".to_string()),
            }]
        );
    }

    #[tokio::test]
    async fn report_by_id_null_result_emits_nothing() {
        let api = MockApi::default();

        let output =
            run_and_capture(&api, query(QueryScope::ReportId("r1".to_string()), false, false))
                .await;

        assert_eq!(
            api.calls(),
            vec![Call::GetReportById {
                report_id: "r1".to_string(),
            }]
        );
        assert!(output.is_empty());
    }

    #[tokio::test]
    async fn report_by_id_emits_the_single_report() {
        let api = MockApi {
            report: Some(report("r1")),
            ..Default::default()
        };

        let output =
            run_and_capture(&api, query(QueryScope::ReportId("r1".to_string()), false, false))
                .await;

        let emitted: GuestPolicyAssignmentReport = serde_json::from_str(&output).unwrap();
        assert_eq!(emitted.id, "r1");
    }

    #[tokio::test]
    async fn yaml_output_is_not_implemented() {
        let api = MockApi {
            assignments: Some(vec![assignment("a1")]),
            ..Default::default()
        };
        let (tx, _rx) = tokio::io::duplex(1024);
        let mut output: Pin<Box<dyn tokio::io::AsyncWrite>> = Box::pin(tx);

        let result = handle_report(
            query(QueryScope::Vm, false, false),
            &api,
            &OutputFormat::Yaml,
            &mut output,
        )
        .await;

        assert!(matches!(result, Err(CliError::NotImplemented(_))));
    }

    #[tokio::test]
    async fn ascii_table_emits_a_row_per_assignment() {
        let api = MockApi {
            assignments: Some(vec![assignment("a1"), assignment("a2")]),
            ..Default::default()
        };
        let (tx, mut rx) = tokio::io::duplex(64 * 1024);
        let mut output: Pin<Box<dyn tokio::io::AsyncWrite>> = Box::pin(tx);

        handle_report(
            query(QueryScope::Vm, false, false),
            &api,
            &OutputFormat::AsciiTable,
            &mut output,
        )
        .await
        .expect("handle_report should succeed");
        drop(output);

        let mut captured = String::new();
        rx.read_to_string(&mut captured).await.unwrap();
        assert!(captured.contains("a1"));
        assert!(captured.contains("a2"));
        assert!(captured.contains("Compliance"));
    }
}
