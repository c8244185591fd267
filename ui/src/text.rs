//! UI strings behind one typed lookup.
//!
//! Widgets never embed literals; they go through [`tr`] so the wording lives
//! in one place and a future locale table only has to replace this match.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Text {
    AppTitle,

    SearchPlaceholder,
    Search,
    Refresh,
    EmptyUsers,

    ColId,
    ColUsername,
    ColEmail,
    ColQuota,
    ColUsedQuota,
    ColSubscribed,
    ColLevel,
    ColTotalMonth,
    ColEnterprise,
    ColBanned,
    ColAdmin,
    ColActions,

    Yes,
    No,

    PasswordAction,
    PasswordActionDesc,
    PasswordField,
    EmailAction,
    EmailActionDesc,
    EmailField,
    QuotaAction,
    QuotaActionDesc,
    QuotaField,
    QuotaSetAction,
    QuotaSetActionDesc,
    SubscriptionAction,
    SubscriptionActionDesc,
    MonthField,
    SubscriptionLevelAction,
    SubscriptionLevelActionDesc,
    LevelField,
    ReleaseAction,
    ReleaseActionDesc,
    ReleaseWarning,

    Submit,
    Cancel,
    Applying,

    OperateSuccess,
    OperateSuccessPrompt,
    OperateFailed,
    FetchFailed,

    SessionExpired,
    SessionExpiredPrompt,

    PrevPage,
    NextPage,
}

pub fn tr(text: Text) -> &'static str {
    match text {
        Text::AppTitle => "Steward",

        Text::SearchPlaceholder => "Search username",
        Text::Search => "Search",
        Text::Refresh => "Refresh",
        Text::EmptyUsers => "No users found",

        Text::ColId => "ID",
        Text::ColUsername => "Username",
        Text::ColEmail => "Email",
        Text::ColQuota => "Quota",
        Text::ColUsedQuota => "Used",
        Text::ColSubscribed => "Subscribed",
        Text::ColLevel => "Level",
        Text::ColTotalMonth => "Months",
        Text::ColEnterprise => "Enterprise",
        Text::ColBanned => "Banned",
        Text::ColAdmin => "Admin",
        Text::ColActions => "Actions",

        Text::Yes => "Yes",
        Text::No => "No",

        Text::PasswordAction => "Reset password",
        Text::PasswordActionDesc => "Set a new password for this account.",
        Text::PasswordField => "New password",
        Text::EmailAction => "Change email",
        Text::EmailActionDesc => "Replace the email address on this account.",
        Text::EmailField => "Email",
        Text::QuotaAction => "Adjust quota",
        Text::QuotaActionDesc => "Add to (or subtract from) the quota balance.",
        Text::QuotaField => "Amount",
        Text::QuotaSetAction => "Set quota",
        Text::QuotaSetActionDesc => "Overwrite the quota balance with an exact value.",
        Text::SubscriptionAction => "Extend subscription",
        Text::SubscriptionActionDesc => "Grant additional subscription months.",
        Text::MonthField => "Months",
        Text::SubscriptionLevelAction => "Set subscription level",
        Text::SubscriptionLevelActionDesc => "Change the subscription tier of this account.",
        Text::LevelField => "Level",
        Text::ReleaseAction => "Release subscription usage",
        Text::ReleaseActionDesc => "Release the recorded subscription usage for this account.",
        Text::ReleaseWarning => "This cannot be undone.",

        Text::Submit => "Confirm",
        Text::Cancel => "Cancel",
        Text::Applying => "Applying...",

        Text::OperateSuccess => "Operation completed",
        Text::OperateSuccessPrompt => "The change has been applied.",
        Text::OperateFailed => "Operation failed",
        Text::FetchFailed => "Failed to load users",

        Text::SessionExpired => "Session expired",
        Text::SessionExpiredPrompt => "Your password changed. Restart the console and sign in again.",

        Text::PrevPage => "Previous page",
        Text::NextPage => "Next page",
    }
}

/// Failure notice body naming the server-provided reason.
pub fn operate_failed_prompt(reason: &str) -> String {
    format!("The server rejected the operation: {reason}")
}

pub fn yes_no(value: bool) -> &'static str {
    if value { tr(Text::Yes) } else { tr(Text::No) }
}
