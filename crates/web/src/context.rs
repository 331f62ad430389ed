use bierklub_club::Member;

/// Who is browsing, resolved from the session cookie.
///
/// Present on every request that went through the session middleware.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionContext {
    member: Option<Member>,
}

impl SessionContext {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn signed_in(member: Member) -> Self {
        Self {
            member: Some(member),
        }
    }

    pub fn member(&self) -> Option<&Member> {
        self.member.as_ref()
    }
}
