//! Bot message texts

use super::engine::{Expected, TurnError};
use super::state::{ConversationState, DialogueStage};
use crate::catalog::{CatalogEntry, InvestmentCatalog};
use crate::intake::Income;

/// Percentage without a trailing ".0" (8 rather than 8.0, but 7.5 stays)
fn short_percent(rate: f64) -> String {
    let text = format!("{:.1}", rate * 100.0);
    match text.strip_suffix(".0") {
        Some(whole) => whole.to_string(),
        None => text,
    }
}

/// Opening question of a session
pub fn greeting() -> String {
    "👋 أهلاً بك! أنا مساعدك المالي. كم راتبك الشهري؟ (مثال: 5000 جنيه)".to_string()
}

pub fn salary_ack(income: &Income) -> String {
    format!("✅ تم تسجيل راتبك: {} {}.", income.amount, income.currency)
}

/// Overview of every catalog entry with its expected return
pub fn catalog_overview(catalog: &InvestmentCatalog) -> String {
    let mut text = String::from("💼 إليك بعض الخيارات الاستثمارية للنظر فيها:\n");
    for entry in catalog.entries() {
        let icon = entry.icon.as_deref().unwrap_or("•");
        text.push_str(&format!(
            "\n{icon} - {}: العائد السنوي المتوقع {}%. {}",
            entry.display_name,
            short_percent(entry.annual_rate),
            entry.risk_note
        ));
    }
    text.push_str("\n\nيمكنك اختيار واحدة بناءً على مستوى المخاطرة الذي تتحمله وأهدافك.");
    text
}

pub fn choose_target() -> String {
    "🎯 اكتب اسم الاستثمار الذي تريده من القائمة أعلاه.".to_string()
}

pub fn target_details(entry: &CatalogEntry) -> String {
    entry.description.clone()
}

pub fn ask_amount() -> String {
    "💰 كم المبلغ الذي تريد استثماره؟".to_string()
}

pub fn ask_years() -> String {
    "⏳ لكم سنة تريد الاستثمار؟".to_string()
}

/// Final projection: target, rate with one decimal, years, profit to two decimals
pub fn profit_summary(
    entry: &CatalogEntry,
    amount: f64,
    currency: &str,
    years: u32,
    profit: f64,
) -> String {
    format!(
        "📊 إذا استثمرت {amount} {currency} في {} بعائد سنوي {:.1}% لمدة {years} سنة، فإن الربح المتوقع هو {profit:.2} {currency}.",
        entry.display_name,
        entry.rate_percent(),
    )
}

pub fn already_complete() -> String {
    "✅ اكتمل الحساب. اكتب /reset لبدء حساب جديد، أو /ask لطرح سؤال على المستشار.".to_string()
}

/// User-facing text for a recoverable turn error
pub fn for_error(error: &TurnError, catalog: &InvestmentCatalog) -> String {
    match error {
        TurnError::ParseFailure {
            expected: Expected::Salary,
            ..
        } => "⚠️ لم أتمكن من العثور على مبلغ في رسالتك. من فضلك اكتب راتبك بالأرقام، مثل: 5000 جنيه."
            .to_string(),
        TurnError::ParseFailure {
            expected: Expected::Amount,
            ..
        } => "⚠️ من فضلك أدخل المبلغ كرقم، مثل: 1000.".to_string(),
        TurnError::ParseFailure {
            expected: Expected::Years,
            ..
        } => "⚠️ من فضلك أدخل عدد السنوات كرقم صحيح، مثل: 5.".to_string(),
        TurnError::UnrecognizedTarget(name) => {
            let names: Vec<&str> = catalog
                .entries()
                .iter()
                .map(|entry| entry.key.as_str())
                .collect();
            format!(
                "❌ عذراً، \"{name}\" غير مدعوم حالياً. اختر واحداً من: {}.",
                names.join("، ")
            )
        }
        TurnError::CalculatorMiss(_) => {
            "⚠️ حدث خطأ أثناء حساب الأرباح. حاول مرة أخرى لاحقاً.".to_string()
        }
    }
}

/// Plain description of what has been collected, for `/status` and the advisor prompt
pub fn state_summary(state: &ConversationState, catalog: &InvestmentCatalog) -> String {
    let unset = "—".to_string();
    let currency = state.currency().unwrap_or_default();
    let target = state
        .target()
        .and_then(|id| catalog.get(id))
        .map_or_else(|| unset.clone(), |entry| entry.display_name.clone());

    let stage = match state.stage() {
        DialogueStage::AwaitingSalary => "بانتظار الراتب",
        DialogueStage::AwaitingTarget => "بانتظار اختيار الاستثمار",
        DialogueStage::AwaitingAmount => "بانتظار مبلغ الاستثمار",
        DialogueStage::AwaitingDuration => "بانتظار مدة الاستثمار",
        DialogueStage::Complete => "مكتمل",
    };

    format!(
        "المرحلة: {stage}\nالراتب: {}\nالاستثمار: {target}\nالمبلغ: {}\nالمدة: {}",
        state
            .salary()
            .map_or_else(|| unset.clone(), |s| format!("{s} {currency}")),
        state
            .amount()
            .map_or_else(|| unset.clone(), |a| format!("{a} {currency}")),
        state
            .years()
            .map_or_else(|| unset.clone(), |y| format!("{y} سنة")),
    )
}
