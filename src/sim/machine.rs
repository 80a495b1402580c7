//! 仿真状态机
//!
//! 独占阶段 / 当前步骤 / 握手子步骤；只按下标读取封装记录，从不查看头部字节。
//! 所有操作都是全函数：越界参数按规则钳制而不是报错。

use tracing::{debug, info};

use super::config::{ConnectionType, SimulationConfig};
use super::phase::{
    COMPLETE_STEP, FIRST_LAYER_STEP, HandshakeSegment, LAST_HANDSHAKE_STEP, LAST_LAYER_STEP,
    Phase, Side, record_index,
};
use crate::encap::{Encapsulation, LayerEncapsulation, build_encapsulation};
use crate::viz::{VizEvent, VizEventKind, VizLogger};

/// 一次仿真会话（每个会话一个实例，由宿主独占并顺序调用）
#[derive(Debug, Default)]
pub struct Simulation {
    config: SimulationConfig,
    phase: Phase,
    current_step: u8,
    handshake_step: u8,
    encapsulation: Option<Encapsulation>,
    /// 配置在 idle / handshake 期间变过，封装待重建
    stale: bool,
    next_viz_seq: u64,
    /// 可选的转换事件记录
    pub viz: Option<VizLogger>,
}

impl Simulation {
    /// 创建处于 idle、尚无封装的会话
    pub fn new(config: SimulationConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn current_step(&self) -> u8 {
        self.current_step
    }

    pub fn handshake_step(&self) -> u8 {
        self.handshake_step
    }

    pub fn encapsulation(&self) -> Option<&Encapsulation> {
        self.encapsulation.as_ref()
    }

    /// 当前 (阶段, 步骤) 指向的记录
    pub fn current_layer(&self) -> Option<&LayerEncapsulation> {
        let idx = record_index(self.phase, self.current_step)?;
        self.encapsulation.as_ref()?.get(idx)
    }

    /// 握手阶段中当前的报文段
    pub fn handshake_segment(&self) -> Option<HandshakeSegment> {
        if self.phase != Phase::Handshake {
            return None;
        }
        HandshakeSegment::for_step(self.handshake_step)
    }

    /// 构建封装并开始一次运行
    #[tracing::instrument(skip(self, config), fields(connection = ?config.connection_type))]
    pub fn start(&mut self, config: SimulationConfig) {
        self.config = config;
        let wire_bytes = self.rebuild();

        match self.config.connection_type {
            ConnectionType::Handshake => {
                self.phase = Phase::Handshake;
                self.handshake_step = 1;
                self.current_step = 0;
            }
            ConnectionType::Direct => {
                self.phase = Phase::Sending;
                self.handshake_step = 0;
                self.current_step = FIRST_LAYER_STEP;
            }
        }

        info!(phase = ?self.phase, wire_bytes, "▶️  开始仿真");
        self.emit(VizEventKind::Start {
            connection: self.config.connection_type,
            protocol: self.config.protocol,
            wire_bytes,
        });
    }

    /// 替换配置；运行中（非 idle / handshake）立即重建封装，阶段与步骤保持不变。
    ///
    /// idle / handshake 期间只记下待重建，进入层步骤时再构建。
    pub fn set_config(&mut self, config: SimulationConfig) {
        self.config = config;
        if matches!(self.phase, Phase::Idle | Phase::Handshake) {
            self.stale = true;
            debug!(phase = ?self.phase, "配置已更新，延后重建");
            return;
        }
        let wire_bytes = self.rebuild();
        debug!(phase = ?self.phase, step = self.current_step, wire_bytes, "配置变化，封装已重建");
        self.emit(VizEventKind::Rebuild { wire_bytes });
    }

    /// 握手前进一步；在第 3 步时结束握手并直接进入发送的第 1 步。
    pub fn advance_handshake(&mut self) {
        if self.handshake_step >= LAST_HANDSHAKE_STEP {
            self.phase = Phase::Sending;
            self.current_step = FIRST_LAYER_STEP;
            self.handshake_step = 0;
            self.sync_encapsulation();
            debug!("握手完成，开始发送");
            self.emit(VizEventKind::Step {
                side: Some(Side::Sending),
            });
            return;
        }
        self.handshake_step += 1;
        debug!(handshake_step = self.handshake_step, "握手前进");
        self.emit_handshake();
    }

    /// 握手后退一步（最低到第 1 步）
    pub fn go_back_handshake(&mut self) {
        if self.handshake_step > 1 {
            self.handshake_step -= 1;
            debug!(handshake_step = self.handshake_step, "握手后退");
            self.emit_handshake();
        }
    }

    /// 回到已经走过的握手
    pub fn go_to_handshake(&mut self) {
        self.phase = Phase::Handshake;
        self.handshake_step = 1;
        self.current_step = 0;
        debug!("回到握手");
        self.emit_handshake();
    }

    /// 开始接收：总是从物理层（步骤 1）开始
    pub fn start_receiving(&mut self) {
        self.phase = Phase::Receiving;
        self.current_step = FIRST_LAYER_STEP;
        self.sync_encapsulation();
        debug!("开始接收");
        self.emit(VizEventKind::Step {
            side: Some(Side::Receiving),
        });
    }

    /// 通用导航原语。
    ///
    /// `n >= 8` 进入 complete，`n <= 0` 回到 idle；否则按 `side` 决定阶段，
    /// 没有提示时保持当前阶段（complete / handshake 归并为 sending），并清零握手步骤。
    #[tracing::instrument(skip(self), fields(from_phase = ?self.phase, from_step = self.current_step))]
    pub fn go_to_step(&mut self, n: i32, side: Option<Side>) {
        self.current_step = n.clamp(0, i32::from(COMPLETE_STEP)) as u8;
        if n >= i32::from(COMPLETE_STEP) {
            self.phase = Phase::Complete;
            info!("✅ 仿真完成");
        } else if n <= 0 {
            self.phase = Phase::Idle;
        } else {
            self.phase = match side {
                Some(side) => side.into(),
                None => match self.phase {
                    Phase::Complete | Phase::Handshake => Phase::Sending,
                    other => other,
                },
            };
            self.handshake_step = 0;
        }
        if !matches!(self.phase, Phase::Idle) {
            self.sync_encapsulation();
        }
        debug!(phase = ?self.phase, step = self.current_step, "跳转");
        self.emit(VizEventKind::Step { side });
    }

    /// 回到 idle 并丢弃封装
    pub fn reset(&mut self) {
        self.phase = Phase::Idle;
        self.current_step = 0;
        self.handshake_step = 0;
        self.encapsulation = None;
        self.stale = false;
        debug!("重置");
        self.emit(VizEventKind::Reset);
    }

    /// 向前一步：发送 7 -> 1，越过线路后接收 1 -> 7，最后进入 complete。
    pub fn next(&mut self) {
        let step = i32::from(self.current_step);
        match self.phase {
            Phase::Handshake => self.advance_handshake(),
            Phase::Sending if self.current_step >= LAST_LAYER_STEP => {
                self.go_to_step(i32::from(FIRST_LAYER_STEP), Some(Side::Receiving))
            }
            Phase::Sending => self.go_to_step(step + 1, Some(Side::Sending)),
            Phase::Receiving if self.current_step >= LAST_LAYER_STEP => {
                self.go_to_step(i32::from(COMPLETE_STEP), None)
            }
            Phase::Receiving => self.go_to_step(step + 1, Some(Side::Receiving)),
            Phase::Idle | Phase::Complete => {}
        }
    }

    /// 向后一步，`next` 的逆过程
    pub fn previous(&mut self) {
        let step = i32::from(self.current_step);
        match self.phase {
            Phase::Handshake => self.go_back_handshake(),
            Phase::Receiving if self.current_step <= FIRST_LAYER_STEP => {
                self.go_to_step(i32::from(LAST_LAYER_STEP), Some(Side::Sending))
            }
            Phase::Receiving => self.go_to_step(step - 1, Some(Side::Receiving)),
            Phase::Sending if self.current_step <= FIRST_LAYER_STEP => {
                if self.config.connection_type == ConnectionType::Handshake {
                    self.go_to_handshake();
                }
            }
            Phase::Sending => self.go_to_step(step - 1, Some(Side::Sending)),
            Phase::Complete => self.go_to_step(i32::from(LAST_LAYER_STEP), Some(Side::Receiving)),
            Phase::Idle => {}
        }
    }

    /// 进入发送 / 接收 / 完成时，缺失或过期的封装按当前配置重建
    fn sync_encapsulation(&mut self) {
        if self.encapsulation.is_some() && !self.stale {
            return;
        }
        let wire_bytes = self.rebuild();
        debug!(phase = ?self.phase, wire_bytes, "进入层步骤，封装已重建");
    }

    fn rebuild(&mut self) -> usize {
        let encapsulation = build_encapsulation(&self.config);
        let wire_bytes = wire_bytes(&encapsulation);
        self.encapsulation = Some(encapsulation);
        self.stale = false;
        wire_bytes
    }

    fn emit_handshake(&mut self) {
        let segment = HandshakeSegment::for_step(self.handshake_step);
        self.emit(VizEventKind::Handshake { segment });
    }

    fn emit(&mut self, kind: VizEventKind) {
        if self.viz.is_none() {
            return;
        }
        let ev = VizEvent {
            seq: self.next_viz_seq,
            phase: self.phase,
            step: self.current_step,
            handshake_step: self.handshake_step,
            layer: self.current_layer_number(),
            kind,
        };
        self.next_viz_seq = self.next_viz_seq.wrapping_add(1);
        if let Some(viz) = self.viz.as_mut() {
            viz.push(ev);
        }
    }

    fn current_layer_number(&self) -> Option<u8> {
        self.current_layer().map(|l| l.layer_number)
    }
}

fn wire_bytes(encapsulation: &Encapsulation) -> usize {
    encapsulation
        .layer(1)
        .map(|l| l.output.size_bytes)
        .unwrap_or_default()
}
