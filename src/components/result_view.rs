//! Rendering for a completed analysis.
//!
//! DESIGN
//! ======
//! The outcome is dispatched on its decoded [`AnalysisResult`] variant; each
//! family gets its own table layout. Unknown families render a notice rather
//! than guessing at fields.

use leptos::prelude::*;

use crate::net::types::{
    AnalysisOutcome, AnalysisResult, DescriptiveResult, GroupComparison, RegressionResult, SurvivalResult,
};
use crate::util::markdown;

#[cfg(test)]
#[path = "result_view_test.rs"]
mod result_view_test;

/// Result tables plus the optional AI interpretation.
#[component]
pub fn ResultView(outcome: AnalysisOutcome) -> impl IntoView {
    let interpretation = outcome.interpretation.clone();
    let body = match outcome.result {
        AnalysisResult::GroupComparison(result) => group_comparison_view(result).into_any(),
        AnalysisResult::Regression(result) => regression_view(result).into_any(),
        AnalysisResult::Survival(result) => survival_view(result).into_any(),
        AnalysisResult::Descriptive(result) => descriptive_view(result).into_any(),
        AnalysisResult::Unsupported => view! {
            <p class="result-view__unsupported">"This result type cannot be displayed yet."</p>
        }
        .into_any(),
    };

    view! {
        <section class="result-view">
            <header class="result-view__header">
                <span class="result-view__method">{outcome.method}</span>
            </header>
            {body}
            {interpretation
                .map(|text| {
                    let rendered = markdown::render_html(&text);
                    view! {
                        <div class="result-view__interpretation">
                            <h3>"Interpretation"</h3>
                            <div class="result-view__markdown" inner_html=rendered></div>
                        </div>
                    }
                })}
        </section>
    }
}

fn group_comparison_view(result: GroupComparison) -> impl IntoView {
    view! {
        <div class="result-view__summary">
            <MetricRow label="Test" value=result.test/>
            <MetricRow label="Statistic" value=format_stat(Some(result.statistic))/>
            <MetricRow label="p-value" value=format_p_value(Some(result.p_value))/>
            <MetricRow label="Effect size" value=format_stat(result.effect_size)/>
        </div>
        <table class="result-view__table">
            <thead>
                <tr>
                    <th>"Group"</th>
                    <th>"n"</th>
                    <th>"Mean"</th>
                    <th>"SD"</th>
                    <th>"Median"</th>
                </tr>
            </thead>
            <tbody>
                {result
                    .groups
                    .into_iter()
                    .map(|g| {
                        view! {
                            <tr>
                                <td>{g.name}</td>
                                <td>{g.n}</td>
                                <td>{format_stat(g.mean)}</td>
                                <td>{format_stat(g.sd)}</td>
                                <td>{format_stat(g.median)}</td>
                            </tr>
                        }
                    })
                    .collect_view()}
            </tbody>
        </table>
    }
}

fn regression_view(result: RegressionResult) -> impl IntoView {
    view! {
        <div class="result-view__summary">
            <MetricRow label="Model" value=result.model/>
            <MetricRow label="n" value=result.n.to_string()/>
            <MetricRow label="R²" value=format_stat(result.r_squared)/>
        </div>
        <table class="result-view__table">
            <thead>
                <tr>
                    <th>"Term"</th>
                    <th>"Estimate"</th>
                    <th>"SE"</th>
                    <th>"95% CI"</th>
                    <th>"p"</th>
                </tr>
            </thead>
            <tbody>
                {result
                    .coefficients
                    .into_iter()
                    .map(|c| {
                        view! {
                            <tr>
                                <td>{c.term}</td>
                                <td>{format_stat(Some(c.estimate))}</td>
                                <td>{format_stat(c.std_error)}</td>
                                <td>{format_interval(c.ci_low, c.ci_high)}</td>
                                <td>{format_p_value(c.p_value)}</td>
                            </tr>
                        }
                    })
                    .collect_view()}
            </tbody>
        </table>
    }
}

fn survival_view(result: SurvivalResult) -> impl IntoView {
    view! {
        <div class="result-view__summary">
            <MetricRow label="Log-rank p" value=format_p_value(result.log_rank_p)/>
            <MetricRow label="Hazard ratio" value=format_stat(result.hazard_ratio)/>
        </div>
        <table class="result-view__table">
            <thead>
                <tr>
                    <th>"Group"</th>
                    <th>"Time points"</th>
                    <th>"Median survival"</th>
                </tr>
            </thead>
            <tbody>
                {result
                    .curves
                    .into_iter()
                    .map(|curve| {
                        view! {
                            <tr>
                                <td>{curve.group}</td>
                                <td>{curve.points.len()}</td>
                                <td>{format_stat(curve.median)}</td>
                            </tr>
                        }
                    })
                    .collect_view()}
            </tbody>
        </table>
    }
}

fn descriptive_view(result: DescriptiveResult) -> impl IntoView {
    view! {
        <table class="result-view__table">
            <thead>
                <tr>
                    <th>"Variable"</th>
                    <th>"n"</th>
                    <th>"Mean"</th>
                    <th>"SD"</th>
                    <th>"Min"</th>
                    <th>"Max"</th>
                </tr>
            </thead>
            <tbody>
                {result
                    .variables
                    .into_iter()
                    .map(|v| {
                        view! {
                            <tr>
                                <td>{v.name}</td>
                                <td>{v.n}</td>
                                <td>{format_stat(v.mean)}</td>
                                <td>{format_stat(v.sd)}</td>
                                <td>{format_stat(v.min)}</td>
                                <td>{format_stat(v.max)}</td>
                            </tr>
                        }
                    })
                    .collect_view()}
            </tbody>
        </table>
    }
}

#[component]
fn MetricRow(label: &'static str, value: String) -> impl IntoView {
    view! {
        <div class="result-view__metric">
            <span class="result-view__label">{label}</span>
            <span class="result-view__value">{value}</span>
        </div>
    }
}

/// Three decimals, or a dash when missing or non-finite.
fn format_stat(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{v:.3}"),
        _ => "—".to_owned(),
    }
}

fn format_p_value(value: Option<f64>) -> String {
    match value {
        Some(p) if p.is_finite() && p < 0.001 => "< 0.001".to_owned(),
        other => format_stat(other),
    }
}

fn format_interval(low: Option<f64>, high: Option<f64>) -> String {
    match (low, high) {
        (Some(_), Some(_)) => format!("{} to {}", format_stat(low), format_stat(high)),
        _ => "—".to_owned(),
    }
}
