// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use rand::seq::SliceRandom;
use rand::Rng;

/// Interview prompts served by `GET /question`
pub const QUESTION_LIST: [&str; 11] = [
    "본인에 대해 간단히 소개해 주세요.",
    "우리 회사에 지원하게 된 동기는 무엇인가요?",
    "본인의 강점과 약점은 무엇이라고 생각하나요?",
    "본인의 가치관을 형성한 경험은 무엇인가요?",
    "이 직무를 수행하는 데 필요한 역량은 무엇이라고 생각하나요?",
    "관련 경험 중 가장 기억에 남는 프로젝트는 무엇인가요?",
    "어려운 문제를 해결했던 경험을 말해 주세요.",
    "팀원과의 의견 충돌을 조율한 경험이 있다면?",
    "우리 회사에 대해 아는 대로 말해보세요.",
    "가장 존경하는 인물과 그 이유는?",
    "동료가 비윤리적인 행동을 했을 때 어떻게 하시겠습니까?",
];

/// Pick one question uniformly at random.
pub fn random_question<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    // The list is a non-empty constant
    QUESTION_LIST.choose(rng).copied().unwrap_or(QUESTION_LIST[0])
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::collections::HashSet;

    #[test]
    fn test_random_question_comes_from_list() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..50 {
            assert!(QUESTION_LIST.contains(&random_question(&mut rng)));
        }
    }

    #[test]
    fn test_random_question_covers_list() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let seen: HashSet<&str> = (0..2000).map(|_| random_question(&mut rng)).collect();
        assert_eq!(seen.len(), QUESTION_LIST.len());
    }
}
