//! Remote mount - 라우트 하나에 붙은 remote 인스턴스
//!
//! 화면이 내려간 뒤 도착한 결과는 버린다 (상태 변경 없음).

use super::binder::RouteHandler;
use super::cache::LoadResult;
use super::state::MountState;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::watch;

/// 로드 결과 적용 여부
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MountOutcome {
    /// 마운트 상태에 반영됨
    Applied(MountState),

    /// 마운트가 abandon되어 결과를 버림
    Discarded,
}

impl MountOutcome {
    pub fn state(&self) -> Option<&MountState> {
        match self {
            Self::Applied(state) => Some(state),
            Self::Discarded => None,
        }
    }
}

/// 다른 task에서 마운트를 abandon하기 위한 핸들
#[derive(Debug, Clone)]
pub struct AbandonHandle {
    flag: Arc<AtomicBool>,
}

impl AbandonHandle {
    pub fn abandon(&self) {
        self.flag.store(true, Ordering::Release);
    }

    pub fn is_abandoned(&self) -> bool {
        self.flag.load(Ordering::Acquire)
    }
}

/// 마운트된 remote
pub struct RemoteMount {
    handler: RouteHandler,
    state: watch::Sender<MountState>,
    abandoned: Arc<AtomicBool>,
}

impl RemoteMount {
    pub(crate) fn new(handler: RouteHandler) -> Self {
        let (state, _) = watch::channel(MountState::Idle);
        Self {
            handler,
            state,
            abandoned: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn name(&self) -> &str {
        self.handler.name()
    }

    /// root 컴포넌트에 넘기는 basePath
    pub fn base_path(&self) -> &str {
        self.handler.base_path()
    }

    /// 현재 상태
    pub fn state(&self) -> MountState {
        self.state.borrow().clone()
    }

    /// 상태 변화 구독 (렌더러용)
    pub fn subscribe(&self) -> watch::Receiver<MountState> {
        self.state.subscribe()
    }

    pub fn abandon_handle(&self) -> AbandonHandle {
        AbandonHandle {
            flag: Arc::clone(&self.abandoned),
        }
    }

    /// 마운트 해제 (이후 도착하는 결과는 무시)
    pub fn abandon(&self) {
        self.abandoned.store(true, Ordering::Release);
    }

    pub fn is_abandoned(&self) -> bool {
        self.abandoned.load(Ordering::Acquire)
    }

    /// 로드 (이미 Ready/Failed면 현재 상태 그대로)
    pub async fn load(&self) -> MountOutcome {
        self.run(false).await
    }

    /// Failed에서 다시 로드
    pub async fn retry(&self) -> MountOutcome {
        self.run(true).await
    }

    async fn run(&self, retry: bool) -> MountOutcome {
        if self.is_abandoned() {
            return MountOutcome::Discarded;
        }

        let current = self.state();
        match current {
            MountState::Ready(_) => return MountOutcome::Applied(current),
            MountState::Failed(_) if !retry => return MountOutcome::Applied(current),
            _ => {}
        }

        self.transition(MountState::Loading);

        let result = match self.handler.start(retry) {
            Ok(load) => load.await,
            Err(e) => Err(e),
        };
        self.apply(result)
    }

    fn apply(&self, result: LoadResult) -> MountOutcome {
        if self.is_abandoned() {
            tracing::debug!("Discarding late load result for abandoned mount '{}'", self.name());
            return MountOutcome::Discarded;
        }

        let next = match result {
            Ok(module) => MountState::Ready(module),
            Err(e) => {
                tracing::warn!("Remote '{}' failed to load: {}", self.name(), e);
                MountState::Failed(e)
            }
        };
        self.transition(next);
        MountOutcome::Applied(self.state())
    }

    fn transition(&self, next: MountState) {
        let name = self.handler.name();
        self.state.send_if_modified(|state| {
            if *state == next {
                return false;
            }
            if !state.can_transition_to(&next) {
                tracing::debug!("Mount '{}': ignoring {} -> {}", name, state, next);
                return false;
            }
            *state = next;
            true
        });
    }
}

impl std::fmt::Debug for RemoteMount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteMount")
            .field("name", &self.name())
            .field("state", &self.state())
            .field("abandoned", &self.is_abandoned())
            .finish()
    }
}

impl Drop for RemoteMount {
    fn drop(&mut self) {
        self.abandon();
    }
}
