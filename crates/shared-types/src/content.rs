//! Static dashboard content for each role.
//!
//! Every collection is listed in display order.

use serde::Serialize;

use crate::{Identity, Role};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuickAction {
    pub label: &'static str,
    pub hint: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SummaryCard {
    pub title: &'static str,
    pub value: &'static str,
    pub meta: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Activity {
    pub title: &'static str,
    pub time: &'static str,
    pub status: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub title: &'static str,
    pub detail: &'static str,
}

/// Everything a role's main page shows besides the user name and date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RoleContent {
    pub role: Role,
    pub role_label: &'static str,
    pub fallback_name: &'static str,
    pub quick_actions: &'static [QuickAction],
    pub summary_cards: &'static [SummaryCard],
    pub activities: &'static [Activity],
    pub notices: &'static [Notice],
}

impl RoleContent {
    /// Identity shown until the session resolves.
    pub fn fallback_identity(&self) -> Identity {
        Identity::fallback(self.fallback_name, self.role)
    }
}

pub const USER_CONTENT: RoleContent = RoleContent {
    role: Role::User,
    role_label: "사용자",
    fallback_name: "샘플 사용자",
    quick_actions: &[
        QuickAction { label: "주문하기", hint: "가까운 맛집 둘러보기" },
        QuickAction { label: "즐겨찾기", hint: "자주 찾는 가게 모아보기" },
        QuickAction { label: "리뷰 작성", hint: "최근 주문 리뷰 남기기" },
    ],
    summary_cards: &[
        SummaryCard { title: "이번 달 주문", value: "8건", meta: "지난달 대비 +2건" },
        SummaryCard { title: "보유 포인트", value: "12,500P", meta: "이번 주 +1,200P" },
    ],
    activities: &[
        Activity { title: "치킨플레이스 주문 완료", time: "오늘 10:24", status: "완료" },
        Activity { title: "카페라떼 주문 접수", time: "어제 19:12", status: "접수" },
        Activity { title: "분식집 리뷰 작성", time: "어제 15:40", status: "리뷰" },
        Activity { title: "샐러드 주문 완료", time: "3일 전", status: "완료" },
        Activity { title: "쿠폰 사용", time: "4일 전", status: "혜택" },
    ],
    notices: &[
        Notice { title: "주말 주문 프로모션", detail: "금요일 오후 6시부터 적용됩니다." },
        Notice { title: "서비스 점검 안내", detail: "다음 주 화요일 02:00 ~ 03:00" },
    ],
};

pub const OWNER_CONTENT: RoleContent = RoleContent {
    role: Role::Owner,
    role_label: "사장님",
    fallback_name: "샘플 사장님",
    quick_actions: &[
        QuickAction { label: "주문 관리", hint: "접수 대기 주문 확인하기" },
        QuickAction { label: "메뉴 관리", hint: "메뉴와 품절 상태 수정하기" },
        QuickAction { label: "리뷰 답글", hint: "새 리뷰에 답글 남기기" },
    ],
    summary_cards: &[
        SummaryCard { title: "오늘 매출", value: "486,000원", meta: "어제 대비 +12%" },
        SummaryCard { title: "오늘 주문", value: "32건", meta: "조리 중 4건" },
    ],
    activities: &[
        Activity { title: "양념치킨 2마리 주문 접수", time: "오늘 11:02", status: "접수" },
        Activity { title: "후라이드 세트 조리 완료", time: "오늘 10:47", status: "완료" },
        Activity { title: "라이더 배차 완료", time: "오늘 10:45", status: "배차" },
        Activity { title: "새 리뷰 등록", time: "어제 21:30", status: "리뷰" },
        Activity { title: "정산 금액 입금", time: "2일 전", status: "정산" },
    ],
    notices: &[
        Notice { title: "수수료 정책 안내", detail: "다음 달 1일부터 새 정산 주기가 적용됩니다." },
        Notice { title: "서비스 점검 안내", detail: "다음 주 화요일 02:00 ~ 03:00" },
    ],
};

pub const RIDER_CONTENT: RoleContent = RoleContent {
    role: Role::Rider,
    role_label: "라이더",
    fallback_name: "샘플 라이더",
    quick_actions: &[
        QuickAction { label: "배달 시작", hint: "근처 배달 요청 받기" },
        QuickAction { label: "배달 내역", hint: "완료한 배달 확인하기" },
        QuickAction { label: "정산 확인", hint: "이번 주 수익 살펴보기" },
    ],
    summary_cards: &[
        SummaryCard { title: "오늘 배달", value: "14건", meta: "평균 23분 소요" },
        SummaryCard { title: "이번 주 수익", value: "312,000원", meta: "지난주 대비 +8%" },
    ],
    activities: &[
        Activity { title: "치킨플레이스 픽업", time: "오늘 10:31", status: "픽업" },
        Activity { title: "카페라떼 배달 완료", time: "오늘 09:58", status: "완료" },
        Activity { title: "분식집 배달 완료", time: "어제 20:14", status: "완료" },
        Activity { title: "배달 요청 거절", time: "어제 18:40", status: "거절" },
        Activity { title: "주간 정산 입금", time: "3일 전", status: "정산" },
    ],
    notices: &[
        Notice { title: "우천 할증 안내", detail: "비 오는 날 건당 500원이 추가됩니다." },
        Notice { title: "안전 운행 캠페인", detail: "헬멧 착용 인증 시 포인트를 드립니다." },
    ],
};

/// Content for a role's main page.
pub fn content_for(role: Role) -> &'static RoleContent {
    match role {
        Role::User => &USER_CONTENT,
        Role::Owner => &OWNER_CONTENT,
        Role::Rider => &RIDER_CONTENT,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ALL_ROLES;
    use pretty_assertions::assert_eq;

    #[test]
    fn user_content_keeps_literal_order() {
        let labels: Vec<_> = USER_CONTENT.quick_actions.iter().map(|a| a.label).collect();
        assert_eq!(labels, vec!["주문하기", "즐겨찾기", "리뷰 작성"]);

        let statuses: Vec<_> = USER_CONTENT.activities.iter().map(|a| a.status).collect();
        assert_eq!(statuses, vec!["완료", "접수", "리뷰", "완료", "혜택"]);

        assert_eq!(USER_CONTENT.summary_cards[1].value, "12,500P");
        assert_eq!(USER_CONTENT.notices[0].title, "주말 주문 프로모션");
    }

    #[test]
    fn every_role_has_the_same_shape() {
        for role in ALL_ROLES {
            let content = content_for(role);
            assert_eq!(content.role, role);
            assert_eq!(content.quick_actions.len(), 3);
            assert_eq!(content.summary_cards.len(), 2);
            assert_eq!(content.activities.len(), 5);
            assert_eq!(content.notices.len(), 2);
        }
    }

    #[test]
    fn labels_and_fallback_names() {
        assert_eq!(USER_CONTENT.role_label, "사용자");
        assert_eq!(OWNER_CONTENT.role_label, "사장님");
        assert_eq!(RIDER_CONTENT.role_label, "라이더");

        let fallback = RIDER_CONTENT.fallback_identity();
        assert_eq!(fallback.name, "샘플 라이더");
        assert_eq!(fallback.role, Role::Rider);
        assert_eq!(fallback.account_id, None);
    }
}
