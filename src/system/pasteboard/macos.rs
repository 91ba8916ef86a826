use std::ffi::CStr;

use cocoa::base::{id, nil, BOOL, NO};
use cocoa::foundation::{NSAutoreleasePool, NSInteger, NSString};
use objc::{class, msg_send, sel, sel_impl};

use super::SystemClipboard;
use crate::shared::errors::{HistoryError, HistoryResult};

/// UTI behind `NSPasteboardTypeString`
const PLAIN_TEXT_TYPE: &str = "public.utf8-plain-text";

/// The general `NSPasteboard`
///
/// Every call runs inside its own autorelease pool so it is safe to use from
/// the monitor's worker threads.
#[derive(Debug, Default, Clone, Copy)]
pub struct Pasteboard;

unsafe fn general_pasteboard() -> id {
    msg_send![class!(NSPasteboard), generalPasteboard]
}

unsafe fn ns_string(value: &str) -> id {
    NSString::alloc(nil).init_str(value).autorelease()
}

impl SystemClipboard for Pasteboard {
    fn change_count(&self) -> i64 {
        unsafe {
            let pool = NSAutoreleasePool::new(nil);
            let count: NSInteger = msg_send![general_pasteboard(), changeCount];
            pool.drain();
            count as i64
        }
    }

    fn read_text(&self) -> Option<String> {
        unsafe {
            let pool = NSAutoreleasePool::new(nil);
            let value: id =
                msg_send![general_pasteboard(), stringForType: ns_string(PLAIN_TEXT_TYPE)];
            let text = if value == nil {
                None
            } else {
                let ptr = NSString::UTF8String(value);
                (!ptr.is_null()).then(|| CStr::from_ptr(ptr).to_string_lossy().into_owned())
            };
            pool.drain();
            text
        }
    }

    fn write_text(&self, text: &str) -> HistoryResult<()> {
        unsafe {
            let pool = NSAutoreleasePool::new(nil);
            let ok: BOOL = msg_send![
                general_pasteboard(),
                setString: ns_string(text)
                forType: ns_string(PLAIN_TEXT_TYPE)
            ];
            pool.drain();
            if ok == NO {
                return Err(HistoryError::Clipboard(
                    "NSPasteboard rejected setString:forType:".to_string(),
                ));
            }
        }
        Ok(())
    }

    fn clear(&self) -> HistoryResult<()> {
        unsafe {
            let pool = NSAutoreleasePool::new(nil);
            let _: NSInteger = msg_send![general_pasteboard(), clearContents];
            pool.drain();
        }
        Ok(())
    }
}
