//! 带类型的事件通道
//!
//! 实时层拥有的发布/订阅通道，载荷是 `ServerEvent` 枚举而不是
//! 字符串事件名。订阅返回守卫对象，drop 即退订，组件卸载时
//! 不会留下悬空回调。

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use laundrylobby_shared::realtime::ServerEvent;

type Handler = Rc<dyn Fn(&ServerEvent)>;

#[derive(Default)]
struct BusInner {
    next_id: usize,
    handlers: Vec<(usize, Handler)>,
}

/// 事件总线，克隆共享同一底层通道
#[derive(Clone, Default)]
pub struct EventBus {
    inner: Rc<RefCell<BusInner>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// 订阅事件；返回的守卫被 drop 时自动退订
    #[must_use = "dropping the subscription immediately unsubscribes"]
    pub fn subscribe<F>(&self, handler: F) -> Subscription
    where
        F: Fn(&ServerEvent) + 'static,
    {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.handlers.push((id, Rc::new(handler)));
        Subscription {
            id,
            bus: Rc::downgrade(&self.inner),
        }
    }

    /// 发布事件给所有订阅者
    ///
    /// 先克隆订阅表再逐个调用，处理器内部可以安全地订阅/退订。
    pub fn publish(&self, event: &ServerEvent) {
        let handlers: Vec<Handler> = self
            .inner
            .borrow()
            .handlers
            .iter()
            .map(|(_, h)| h.clone())
            .collect();
        for handler in handlers {
            handler(event);
        }
    }

    #[cfg(test)]
    fn subscriber_count(&self) -> usize {
        self.inner.borrow().handlers.len()
    }
}

/// 订阅守卫
pub struct Subscription {
    id: usize,
    bus: Weak<RefCell<BusInner>>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(bus) = self.bus.upgrade() {
            bus.borrow_mut().handlers.retain(|(id, _)| *id != self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn published_events_reach_all_subscribers() {
        let bus = EventBus::new();
        let seen_a = Rc::new(Cell::new(0));
        let seen_b = Rc::new(Cell::new(0));

        let a = seen_a.clone();
        let _sub_a = bus.subscribe(move |_| a.set(a.get() + 1));
        let b = seen_b.clone();
        let _sub_b = bus.subscribe(move |_| b.set(b.get() + 1));

        bus.publish(&ServerEvent::PermissionsUpdated {
            changed_modules: vec![],
        });
        assert_eq!(seen_a.get(), 1);
        assert_eq!(seen_b.get(), 1);
    }

    #[test]
    fn dropping_the_guard_unsubscribes() {
        let bus = EventBus::new();
        let seen = Rc::new(Cell::new(0));

        let s = seen.clone();
        let sub = bus.subscribe(move |_| s.set(s.get() + 1));
        assert_eq!(bus.subscriber_count(), 1);

        drop(sub);
        assert_eq!(bus.subscriber_count(), 0);

        bus.publish(&ServerEvent::PermissionsUpdated {
            changed_modules: vec![],
        });
        assert_eq!(seen.get(), 0);
    }

    #[test]
    fn handlers_receive_the_typed_payload() {
        let bus = EventBus::new();
        let modules = Rc::new(RefCell::new(Vec::new()));

        let m = modules.clone();
        let _sub = bus.subscribe(move |event| {
            if let ServerEvent::PermissionsUpdated { changed_modules } = event {
                m.borrow_mut().extend(changed_modules.iter().cloned());
            }
        });

        bus.publish(&ServerEvent::PermissionsUpdated {
            changed_modules: vec!["orders".to_string()],
        });
        assert_eq!(*modules.borrow(), vec!["orders".to_string()]);
    }

    #[test]
    fn unsubscribing_inside_a_handler_does_not_panic() {
        let bus = EventBus::new();
        let slot: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));

        let inner_slot = slot.clone();
        let sub = bus.subscribe(move |_| {
            // drop own subscription while the bus is mid-publish
            inner_slot.borrow_mut().take();
        });
        *slot.borrow_mut() = Some(sub);

        bus.publish(&ServerEvent::PermissionsUpdated {
            changed_modules: vec![],
        });
        assert_eq!(bus.subscriber_count(), 0);
    }
}
