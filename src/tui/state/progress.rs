//! 生成进度状态

use crate::generation::{GenerationError, GenerationJob};
use crate::quiz::Question;
use crate::tui::theme::config::SPINNER_FRAMES;
use std::time::Duration;

/// 正在进行的生成任务
#[derive(Debug)]
pub struct GenerationProgress {
    /// 后台任务
    job: GenerationJob,
    /// 预计耗时，用于进度条
    expected: Duration,
    /// 动画帧计数
    tick: usize,
}

impl GenerationProgress {
    /// 包装一个已启动的任务
    pub fn new(job: GenerationJob, expected: Duration) -> Self {
        Self {
            job,
            expected,
            tick: 0,
        }
    }

    /// 推进一帧并检查结果
    pub fn tick(&mut self) -> Option<Result<Vec<Question>, GenerationError>> {
        self.tick = self.tick.wrapping_add(1);
        self.job.poll()
    }

    /// 放弃任务
    pub fn cancel(self) -> GenerationError {
        self.job.cancel()
    }

    /// 当前动画帧
    pub fn spinner(&self) -> &'static str {
        SPINNER_FRAMES[self.tick % SPINNER_FRAMES.len()]
    }

    /// 进度比例，超过预计耗时后停在 95%
    pub fn ratio(&self) -> f64 {
        if self.expected.is_zero() {
            return self.job.timeout_ratio();
        }
        let ratio = self.job.elapsed().as_secs_f64() / self.expected.as_secs_f64();
        ratio.min(0.95)
    }

    /// 已用秒数
    pub fn elapsed_secs(&self) -> u64 {
        self.job.elapsed().as_secs()
    }

    /// 请求的题目数
    pub fn total_questions(&self) -> u32 {
        self.job.request().total_questions()
    }
}
