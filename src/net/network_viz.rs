//! Visualization hooks for the network.

use std::sync::{Arc, Mutex};

use crate::viz::{VizChannelInfo, VizDeviceInfo, VizEvent, VizEventKind, VizLogger};

use super::device::NetDevice;
use super::trace::TraceRecord;
use super::{Network, PointToPointNetDevice};

impl Network {
    /// Start recording every trace source of every device.
    ///
    /// The first recorded event is a `meta` snapshot of the current topology;
    /// devices added later are hooked as well.
    pub fn enable_viz(&mut self) -> Arc<Mutex<VizLogger>> {
        let logger = Arc::new(Mutex::new(VizLogger::default()));
        self.viz = Some(logger.clone());
        self.emit_viz_meta();
        for slot in 0..self.device_count() {
            let dev = self.device_mut(super::DeviceId(slot));
            Self::hook_viz(dev, logger.clone());
        }
        logger
    }

    pub fn emit_viz_meta(&mut self) {
        let Some(viz) = &self.viz else {
            return;
        };
        let devices = self
            .devices()
            .map(|d| VizDeviceInfo {
                id: d.id().0,
                address: d.address().to_string(),
                data_rate_bps: d.data_rate().bps(),
                mtu: d.mtu(),
                compression_enabled: d.compression_enabled(),
            })
            .collect::<Vec<_>>();
        let channels = self
            .channels()
            .iter()
            .map(|c| VizChannelInfo {
                id: c.id.0,
                devices: (0..c.device_count()).map(|i| c.device_at(i).0).collect(),
                delay_ns: c.delay.0,
            })
            .collect::<Vec<_>>();
        if let Ok(mut v) = viz.lock() {
            v.push(VizEvent {
                t_ns: 0,
                device: None,
                uid: None,
                bytes: None,
                kind: VizEventKind::Meta { devices, channels },
            });
        }
    }

    pub(super) fn hook_viz(dev: &mut PointToPointNetDevice, logger: Arc<Mutex<VizLogger>>) {
        dev.trace_connect_all(Box::new(move |rec: &TraceRecord<'_>| {
            if let Ok(mut v) = logger.lock() {
                v.push(VizEvent {
                    t_ns: rec.at.0,
                    device: Some(rec.device.0),
                    uid: Some(rec.packet.uid),
                    bytes: Some(rec.packet.size()),
                    kind: VizEventKind::Trace { source: rec.source },
                });
            }
        }));
    }
}
